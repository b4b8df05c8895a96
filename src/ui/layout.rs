use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions of the dashboard
pub struct TuiLayout {
    pub header: Rect,
    pub filters: Rect,
    pub table: Rect,
    pub status_bar: Rect,
}

impl TuiLayout {
    /// Create a new layout from the given area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(6), // Filter panel, two rows of inputs
                Constraint::Min(0),    // Records table
                Constraint::Length(4), // Status bar
            ])
            .split(area);

        Self {
            header: chunks[0],
            filters: chunks[1],
            table: chunks[2],
            status_bar: chunks[3],
        }
    }

    /// Split the filter panel into a 3x2 grid, row-major
    pub fn filter_cells(&self) -> Vec<Rect> {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3)])
            .split(self.filters);

        rows.iter()
            .flat_map(|row| {
                Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([
                        Constraint::Ratio(1, 3),
                        Constraint::Ratio(1, 3),
                        Constraint::Ratio(1, 3),
                    ])
                    .split(*row)
                    .to_vec()
            })
            .collect()
    }
}
