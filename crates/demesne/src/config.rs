//! Configuration types for Demesne diagram building.
//!
//! This module provides configuration structures that control how boxes are
//! laid out and colored. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - The column-budget constants of the grid layout.
//! - [`StyleConfig`] - Background color tags per object role.

use serde::Deserialize;

use demesne_core::object::Kind;

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

fn default_margin() -> usize {
    1
}

fn default_gap() -> usize {
    1
}

fn default_title_width() -> usize {
    1
}

fn default_max_list_columns() -> usize {
    4
}

/// The fixed constants of a box's column budget.
///
/// The total column count of a box is
/// `left_margin + max_left + gap + title_width + max_right + right_margin`,
/// where `max_left` and `max_right` come from the box's members.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Blank columns before the left list area.
    #[serde(default = "default_margin")]
    left_margin: usize,

    /// Blank columns after the right list area.
    #[serde(default = "default_margin")]
    right_margin: usize,

    /// Blank columns between the left list area and the title column.
    #[serde(default = "default_gap")]
    gap: usize,

    /// Columns spanned by a member's title cell.
    #[serde(default = "default_title_width")]
    title_width: usize,

    /// Cap on the columns a member's left or right list may occupy; longer
    /// lists wrap onto additional rows.
    #[serde(default = "default_max_list_columns")]
    max_list_columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            left_margin: default_margin(),
            right_margin: default_margin(),
            gap: default_gap(),
            title_width: default_title_width(),
            max_list_columns: default_max_list_columns(),
        }
    }
}

impl LayoutConfig {
    /// Returns the left margin width.
    pub fn left_margin(&self) -> usize {
        self.left_margin
    }

    /// Returns the right margin width.
    pub fn right_margin(&self) -> usize {
        self.right_margin
    }

    /// Returns the gap width.
    pub fn gap(&self) -> usize {
        self.gap
    }

    /// Returns the title column width.
    pub fn title_width(&self) -> usize {
        self.title_width
    }

    /// Returns the list column cap.
    pub fn max_list_columns(&self) -> usize {
        self.max_list_columns
    }
}

/// Background color tags per object role.
///
/// Colors are opaque strings passed through to the renderer unparsed.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "StyleConfig::default_entity")]
    entity: String,

    #[serde(default = "StyleConfig::default_value_object")]
    value_object: String,

    #[serde(default = "StyleConfig::default_service")]
    service: String,

    #[serde(default = "StyleConfig::default_factory")]
    factory: String,

    #[serde(default = "StyleConfig::default_general")]
    general: String,

    #[serde(default = "StyleConfig::default_interface")]
    interface: String,

    #[serde(default = "StyleConfig::default_title")]
    title: String,
}

impl StyleConfig {
    fn default_entity() -> String {
        "#ffc9c9".to_string()
    }

    fn default_value_object() -> String {
        "#a5d8ff".to_string()
    }

    fn default_service() -> String {
        "#b2f2bb".to_string()
    }

    fn default_factory() -> String {
        "#ffec99".to_string()
    }

    fn default_general() -> String {
        "#e9ecef".to_string()
    }

    fn default_interface() -> String {
        "#ffd8a8".to_string()
    }

    fn default_title() -> String {
        "#dee2e6".to_string()
    }

    /// The background tag for a member of the given role.
    pub fn color_for(&self, kind: Kind) -> &str {
        match kind {
            Kind::Entity => &self.entity,
            Kind::ValueObject | Kind::Class => &self.value_object,
            Kind::Service => &self.service,
            Kind::Factory => &self.factory,
            Kind::General | Kind::Function => &self.general,
            Kind::Interface | Kind::InterfaceMethod => &self.interface,
        }
    }

    /// The background tag for box title rows.
    pub fn title_color(&self) -> &str {
        &self.title
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            entity: Self::default_entity(),
            value_object: Self::default_value_object(),
            service: Self::default_service(),
            factory: Self::default_factory(),
            general: Self::default_general(),
            interface: Self::default_interface(),
            title: Self::default_title(),
        }
    }
}
