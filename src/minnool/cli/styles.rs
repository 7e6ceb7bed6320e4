use console::Style;
use once_cell::sync::Lazy;

pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static TIME: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());
pub static HEADER: Lazy<Style> = Lazy::new(|| Style::new().cyan().bold());
pub static RULE: Lazy<Style> = Lazy::new(|| Style::new().dim());

/// Terminal colour for a persisted cover tag. Unknown tags render grey.
pub fn cover_color256(tag: &str) -> u8 {
    match tag {
        "bg-indigo-500" => 63,
        "bg-emerald-500" => 36,
        "bg-rose-500" => 204,
        "bg-amber-500" => 214,
        "bg-violet-500" => 99,
        "bg-sky-500" => 39,
        "bg-fuchsia-500" => 171,
        "bg-teal-500" => 37,
        _ => 245,
    }
}

pub fn cover_style(tag: &str) -> Style {
    Style::new().color256(cover_color256(tag))
}
