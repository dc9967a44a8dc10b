use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

/// Keys of one action, its label, and whether it can be used right now.
#[derive(Debug, Clone, Copy)]
pub struct KeyHint<'a> {
    pub keys: &'a [&'a str],
    pub label: &'a str,
    pub enabled: bool,
}

impl<'a> KeyHint<'a> {
    pub const fn new(keys: &'a [&'a str], label: &'a str) -> Self {
        Self {
            keys,
            label,
            enabled: true,
        }
    }

    pub const fn enabled(self, enabled: bool) -> Self {
        Self { enabled, ..self }
    }
}

#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    hints: Vec<KeyHint<'a>>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(hints: impl IntoIterator<Item = KeyHint<'a>>) -> Self {
        Self {
            hints: hints.into_iter().collect(),
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn spans(&self) -> Vec<Span<'a>> {
        let mut spans = vec![];
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", SEPARATOR_STYLE));
            }
            let (key_style, label_style) = if hint.enabled {
                (KEY_STYLE, LABEL_STYLE)
            } else {
                (DISABLED_STYLE, DISABLED_STYLE)
            };
            for (i, key) in hint.keys.iter().copied().enumerate() {
                if i > 0 {
                    spans.push(Span::styled("/", SEPARATOR_STYLE));
                }
                spans.push(Span::styled(key, key_style));
            }
            spans.push(Span::from(" "));
            spans.push(Span::styled(hint.label, label_style));
        }
        spans
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const LABEL_STYLE: Style = Style::new().fg(Color::White);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DISABLED_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::CROSSED_OUT);

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        Line::from(self.spans()).centered().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_hint_is_struck_through() {
        let display = KeyBindingDisplay::new([
            KeyHint::new(&["Enter"], "Start"),
            KeyHint::new(&["e"], "End").enabled(false),
        ]);
        let spans = display.spans();
        let text: String = spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "Enter Start | e End");
        let end = spans.iter().find(|span| span.content == "End").unwrap();
        assert_eq!(end.style, DISABLED_STYLE);
    }

    #[test]
    fn test_alternative_keys_are_joined() {
        let display = KeyBindingDisplay::new([KeyHint::new(&["q", "Esc"], "Quit")]);
        let text: String = display
            .spans()
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(text, "q/Esc Quit");
    }
}
