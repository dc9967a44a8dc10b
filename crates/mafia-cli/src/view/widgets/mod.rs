pub use self::{
    key_binding_display::*, role_card::*, round_clock::*, round_history::*, summary_bars::*,
};

mod key_binding_display;
mod role_card;
mod round_clock;
mod round_history;
mod summary_bars;
