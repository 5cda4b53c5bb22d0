use rand::Rng;
use ratatui::style::Color;

pub const RAINBOW: [Color; 8] = [
    Color::Rgb(0xff, 0x00, 0x00),
    Color::Rgb(0xff, 0x7f, 0x00),
    Color::Rgb(0xff, 0xff, 0x00),
    Color::Rgb(0x00, 0xff, 0x00),
    Color::Rgb(0x00, 0x00, 0xff),
    Color::Rgb(0x4b, 0x00, 0x82),
    Color::Rgb(0x8f, 0x00, 0xff),
    Color::Rgb(0xff, 0xff, 0xff),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteMode {
    Rainbow,
    Flat(Color),
}

/// Hands out segment colours. In rainbow mode every `band` consecutive
/// segments share one randomly picked colour.
#[derive(Clone, Debug)]
pub struct Palette {
    mode: PaletteMode,
    band: u16,
    index: usize,
    counter: u16,
}

impl Palette {
    pub fn new(mode: PaletteMode, band: u16) -> Self {
        Palette {
            mode,
            band: band.max(1),
            index: 0,
            counter: 0,
        }
    }

    pub fn next_color(&mut self, rng: &mut impl Rng) -> Color {
        match self.mode {
            PaletteMode::Flat(color) => color,
            PaletteMode::Rainbow => {
                if self.counter == 0 {
                    self.index = rng.gen_range(0..RAINBOW.len());
                }
                self.counter = (self.counter + 1) % self.band;
                RAINBOW[self.index]
            }
        }
    }
}
