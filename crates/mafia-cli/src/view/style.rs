use mafia_engine::{Balance, RoundPhase, Role};
use ratatui::style::{Color, Modifier, Style};

mod color {
    use ratatui::style::Color;

    pub const CRIMSON: Color = Color::Rgb(200, 40, 60);
    pub const TEAL: Color = Color::Rgb(40, 170, 160);
    pub const AMBER: Color = Color::Rgb(230, 170, 40);
    pub const VIOLET: Color = Color::Rgb(150, 110, 230);
    pub const SKY: Color = Color::Rgb(90, 160, 230);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub const TEXT: Style = Style::new().fg(color::WHITE);
pub const MUTED: Style = Style::new().fg(color::GRAY);
pub const TITLE: Style = Style::new().fg(color::WHITE).add_modifier(Modifier::BOLD);
pub const FOCUSED: Style = Style::new()
    .fg(color::AMBER)
    .add_modifier(Modifier::BOLD);
pub const ERROR: Style = Style::new().fg(color::CRIMSON);
pub const BAR: Style = Style::new().fg(color::SKY);
pub const DIALOG: Style = Style::new().fg(color::WHITE).bg(color::CRIMSON);

pub const fn role(role: Role) -> Style {
    let fg = match role {
        Role::Mafia => color::CRIMSON,
        Role::Civilian => color::TEAL,
        Role::Doctor => color::SKY,
        Role::Seer => color::VIOLET,
    };
    Style::new().fg(fg).add_modifier(Modifier::BOLD)
}

pub const fn phase(phase: RoundPhase) -> Color {
    match phase {
        RoundPhase::Ready => color::AMBER,
        RoundPhase::Running => color::TEAL,
        RoundPhase::Finished => color::CRIMSON,
    }
}

pub const fn balance(balance: Balance) -> Style {
    let fg = match balance {
        Balance::NoMafia | Balance::MafiaHeavy => color::CRIMSON,
        Balance::VillagerHeavy => color::AMBER,
        Balance::Balanced => color::TEAL,
    };
    Style::new().fg(fg)
}
