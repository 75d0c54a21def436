//! Export job sent once to `POST /dobble/export/pdf`.
//!
//! The option structs mirror the layout knobs the PDF service understands.
//! Their `Default` impls are the values the client always sends unless the
//! caller overrides them.

use serde::{Deserialize, Serialize};

use crate::deck::Card;
use crate::symbol::SymbolDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOptions {
    pub size: String,
    pub orientation: Orientation,
    pub margin_mm: f64,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            size: "A4".to_string(),
            orientation: Orientation::Portrait,
            margin_mm: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardOptions {
    pub diameter_mm: f64,
    pub stroke_mm: f64,
    pub per_page: u32,
    pub cut_marks: bool,
    pub bleed_mm: f64,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            diameter_mm: 110.0,
            stroke_mm: 0.4,
            per_page: 2,
            cut_marks: true,
            bleed_mm: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    Any,
    #[default]
    Bounded,
    Steps90,
    Steps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingStrategy {
    Auto,
    #[default]
    Single,
}

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Per-card symbol placement jitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomizationOptions {
    /// `None` lets the service pick a fresh seed on every export.
    pub seed: Option<u64>,
    pub rotation_mode: RotationMode,
    pub rotation_deg: Range,
    pub scale: Range,
    pub angular_jitter_deg: f64,
    pub radial_jitter_mm: f64,
    pub ring_strategy: RingStrategy,
}

impl Default for RandomizationOptions {
    fn default() -> Self {
        Self {
            seed: None,
            rotation_mode: RotationMode::Bounded,
            rotation_deg: Range::new(0.0, 360.0),
            scale: Range::new(0.5, 1.2),
            angular_jitter_deg: 3.0,
            radial_jitter_mm: 2.5,
            ring_strategy: RingStrategy::Single,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub embed_fonts: bool,
    pub image_dpi: u32,
    pub safe_mode: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            embed_fonts: true,
            image_dpi: 300,
            safe_mode: true,
        }
    }
}

/// Layout settings shared by every export of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub page: PageOptions,
    pub card: CardOptions,
    pub randomization: RandomizationOptions,
    pub options: RenderOptions,
}

/// Immutable snapshot of everything the PDF service needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportJob {
    pub n: u32,
    pub symbols_per_card: u32,
    pub num_cards: u32,
    pub cards: Vec<Card>,
    pub symbols: Vec<SymbolDefinition>,
    pub page: PageOptions,
    pub card: CardOptions,
    pub randomization: RandomizationOptions,
    pub options: RenderOptions,
}

impl ExportJob {
    pub fn new(
        n: u32,
        symbols_per_card: u32,
        num_cards: u32,
        cards: Vec<Card>,
        symbols: Vec<SymbolDefinition>,
        settings: ExportSettings,
    ) -> Self {
        Self {
            n,
            symbols_per_card,
            num_cards,
            cards,
            symbols,
            page: settings.page,
            card: settings.card,
            randomization: settings.randomization,
            options: settings.options,
        }
    }
}
