//! Retained-mode surface types
//!
//! A `Surface` is the root object a view owns: a background, a few text
//! labels and an optional grid of rounded cells. The renderer reads it;
//! views mutate it through the driver.

use heapless::{String, Vec};

/// Maximum labels per surface
pub const MAX_LABELS: usize = 4;

/// Maximum characters per label
pub const LABEL_LEN: usize = 24;

/// Maximum cells in a grid
pub const MAX_CELLS: usize = 64;

/// Maximum characters in a surface name
pub const NAME_LEN: usize = 16;

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    /// Create a colour from components
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a colour from `0xRRGGBB`
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }
}

/// Reference point a widget is aligned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Anchor {
    TopLeft,
    #[default]
    TopMid,
    Center,
}

/// Text size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontSize {
    #[default]
    Medium,
    Large,
}

/// Placement and look of a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LabelStyle {
    pub font: FontSize,
    pub color: Rgb,
    pub anchor: Anchor,
    /// Offset from the anchor in pixels (x, y)
    pub offset: (i16, i16),
}

impl LabelStyle {
    /// Black medium text centred at the top, `y` pixels down
    pub const fn title(y: i16) -> Self {
        Self {
            font: FontSize::Medium,
            color: Rgb::BLACK,
            anchor: Anchor::TopMid,
            offset: (0, y),
        }
    }
}

/// A text label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String<LABEL_LEN>,
    style: LabelStyle,
}

impl Label {
    /// Label text
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Label style
    pub fn style(&self) -> &LabelStyle {
        &self.style
    }
}

/// Geometry of a cell grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridLayout {
    pub rows: u8,
    pub cols: u8,
    /// Cell edge length in pixels
    pub cell_size: u8,
    /// Gap between cells in pixels
    pub spacing: u8,
    /// Cell corner radius in pixels
    pub radius: u8,
    /// Inner padding of the grid container in pixels
    pub padding: u8,
    pub anchor: Anchor,
    pub offset: (i16, i16),
    /// Container background
    pub background: Rgb,
    /// Cell border colour
    pub border: Rgb,
}

impl GridLayout {
    /// Number of cells
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Container width in pixels
    pub const fn width(&self) -> u16 {
        self.span(self.cols) + 2 * self.padding as u16
    }

    /// Container height in pixels
    pub const fn height(&self) -> u16 {
        self.span(self.rows) + 2 * self.padding as u16
    }

    /// Top-left corner of a cell relative to the container
    pub fn cell_origin(&self, cell: usize) -> Option<(u16, u16)> {
        if cell >= self.cell_count() || self.cols == 0 {
            return None;
        }
        let pitch = self.cell_size as u16 + self.spacing as u16;
        let row = (cell / self.cols as usize) as u16;
        let col = (cell % self.cols as usize) as u16;
        Some((
            self.padding as u16 + col * pitch,
            self.padding as u16 + row * pitch,
        ))
    }

    const fn span(&self, count: u8) -> u16 {
        if count == 0 {
            return 0;
        }
        count as u16 * (self.cell_size as u16 + self.spacing as u16) - self.spacing as u16
    }
}

/// A grid of coloured cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    layout: GridLayout,
    cells: Vec<Rgb, MAX_CELLS>,
}

impl CellGrid {
    /// Grid geometry
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Cell colours in row-major order
    pub fn cells(&self) -> &[Rgb] {
        &self.cells
    }
}

/// Root surface
#[derive(Debug, Clone)]
pub struct Surface {
    /// Name of the owning view
    name: String<NAME_LEN>,
    /// Background fill
    background: Rgb,
    labels: Vec<Label, MAX_LABELS>,
    grid: Option<CellGrid>,
    /// Whether the surface needs to be redrawn
    dirty: bool,
}

impl Surface {
    /// Create an empty white surface
    ///
    /// Names longer than [`NAME_LEN`] are truncated.
    pub fn new(name: &str) -> Self {
        let mut owned = String::new();
        for ch in name.chars() {
            if owned.push(ch).is_err() {
                break;
            }
        }
        Self {
            name: owned,
            background: Rgb::WHITE,
            labels: Vec::new(),
            grid: None,
            dirty: true,
        }
    }

    /// Surface name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Background colour
    pub fn background(&self) -> Rgb {
        self.background
    }

    /// All labels
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get a label by index
    pub fn label(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// Cell grid, if any
    pub fn grid(&self) -> Option<&CellGrid> {
        self.grid.as_ref()
    }

    /// Add a label, returning its index
    pub fn add_label(&mut self, text: &str, style: LabelStyle) -> Option<usize> {
        let label = Label {
            text: truncated(text),
            style,
        };
        self.labels.push(label).ok()?;
        self.dirty = true;
        Some(self.labels.len() - 1)
    }

    /// Replace the text of a label
    ///
    /// Returns `false` if the label does not exist.
    pub fn set_label_text(&mut self, index: usize, text: &str) -> bool {
        match self.labels.get_mut(index) {
            Some(label) => {
                if label.text.as_str() != text {
                    label.text = truncated(text);
                    self.dirty = true;
                }
                true
            }
            None => false,
        }
    }

    /// Attach a grid with every cell set to white
    ///
    /// Returns `false` if a grid already exists or the layout has more
    /// than [`MAX_CELLS`] cells.
    pub fn set_grid(&mut self, layout: GridLayout) -> bool {
        if self.grid.is_some() || layout.cell_count() > MAX_CELLS {
            return false;
        }
        let mut cells = Vec::new();
        for _ in 0..layout.cell_count() {
            let _ = cells.push(Rgb::WHITE);
        }
        self.grid = Some(CellGrid { layout, cells });
        self.dirty = true;
        true
    }

    /// Paint one cell; returns `false` if there is no such cell
    pub fn set_cell(&mut self, cell: usize, color: Rgb) -> bool {
        let Some(slot) = self.grid.as_mut().and_then(|g| g.cells.get_mut(cell)) else {
            return false;
        };
        *slot = color;
        self.dirty = true;
        true
    }

    /// Paint every cell; returns `false` if there is no grid
    pub fn fill_cells(&mut self, color: Rgb) -> bool {
        let Some(grid) = self.grid.as_mut() else {
            return false;
        };
        for cell in grid.cells.iter_mut() {
            *cell = color;
        }
        self.dirty = true;
        true
    }

    /// Check if surface needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark surface as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Mark surface as dirty (needs redraw)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

fn truncated(text: &str) -> String<LABEL_LEN> {
    let mut out = String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}
