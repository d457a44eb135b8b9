// Grid layout engine - shelf packing of rows and groups onto the canvas
use crate::domain::grid::{CANVAS_WIDTH, GROUP_HEADER_HEIGHT};
use crate::domain::panel::{Geometry, GroupHeader, Placed, Row};
use serde::Deserialize;

/// What to do with a panel row whose widths add up to more than the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Start a new shelf when the next panel would not fit.
    #[default]
    Wrap,
    /// Keep packing to the right; positions past the canvas are left as is.
    Ignore,
    /// Fail before placing the row.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error(
        "row {row} of {} is {width} grid units wide, canvas is {}",
        describe_location(.group.as_deref()),
        CANVAS_WIDTH
    )]
    Overflow {
        group: Option<String>,
        row: usize,
        width: u32,
    },

    #[error("row {row} of {} runs past the largest grid coordinate", describe_location(.group.as_deref()))]
    CoordinateOverflow { group: Option<String>, row: usize },
}

fn describe_location(group: Option<&str>) -> String {
    match group {
        Some(title) => format!("group '{}'", title),
        None => "the dashboard".to_string(),
    }
}

/// `from + by`, or a coordinate overflow attributed to `row`.
fn advance(from: u32, by: u32, within: Option<&str>, row: usize) -> Result<u32, LayoutError> {
    from.checked_add(by).ok_or_else(|| LayoutError::CoordinateOverflow {
        group: within.map(str::to_string),
        row,
    })
}

/// Positioned output plus the cursor right below the last shelf.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout<P> {
    pub panels: Vec<Placed<P>>,
    pub next_y: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine {
    policy: OverflowPolicy,
}

impl LayoutEngine {
    pub fn new(policy: OverflowPolicy) -> Self {
        Self { policy }
    }

    /// Lay `rows` out top to bottom starting at `y0`.
    ///
    /// Expanded groups are flattened: the header is followed by its content
    /// in the same coordinate space. Collapsed groups keep their content
    /// inside the header, laid out from y = 0, and only the header takes
    /// vertical space.
    pub fn layout<P: Geometry>(&self, rows: Vec<Row<P>>, y0: u32) -> Result<Layout<P>, LayoutError> {
        self.layout_rows(rows, y0, None)
    }

    fn layout_rows<P: Geometry>(
        &self,
        rows: Vec<Row<P>>,
        y0: u32,
        within: Option<&str>,
    ) -> Result<Layout<P>, LayoutError> {
        let mut placed = Vec::new();
        let mut y = y0;

        for (index, row) in rows.into_iter().enumerate() {
            match row {
                Row::Group(group) => {
                    let mut header = GroupHeader::at(group.title, group.collapsed, y);
                    y = advance(y, GROUP_HEADER_HEIGHT, within, index)?;

                    if group.collapsed {
                        let nested = self.layout_rows(group.rows, 0, Some(header.title.as_str()))?;
                        tracing::debug!(
                            "Collapsed group '{}' at y={} holds {} panels",
                            header.title,
                            header.grid_pos.y,
                            nested.panels.len()
                        );
                        header.panels = nested.panels;
                        placed.push(Placed::Header(header));
                    } else {
                        let nested = self.layout_rows(group.rows, y, Some(header.title.as_str()))?;
                        tracing::debug!(
                            "Expanded group '{}' spans y={}..{}",
                            header.title,
                            header.grid_pos.y,
                            nested.next_y
                        );
                        placed.push(Placed::Header(header));
                        placed.extend(nested.panels);
                        y = nested.next_y;
                    }
                }
                Row::Panels(panels) => {
                    y = self.pack_shelf(panels, y, index, within, &mut placed)?;
                }
            }
        }

        Ok(Layout { panels: placed, next_y: y })
    }

    /// Place one panel row and return the cursor below it.
    fn pack_shelf<P: Geometry>(
        &self,
        panels: Vec<P>,
        mut y: u32,
        index: usize,
        within: Option<&str>,
        out: &mut Vec<Placed<P>>,
    ) -> Result<u32, LayoutError> {
        let width = panels.iter().map(Geometry::width).fold(0, u32::saturating_add);
        if width > CANVAS_WIDTH {
            match self.policy {
                OverflowPolicy::Reject => {
                    return Err(LayoutError::Overflow {
                        group: within.map(str::to_string),
                        row: index,
                        width,
                    });
                }
                OverflowPolicy::Ignore => {
                    tracing::warn!("Row {} is {} units wide and will overflow the canvas", index, width);
                }
                OverflowPolicy::Wrap => {
                    tracing::debug!("Row {} is {} units wide, wrapping", index, width);
                }
            }
        }

        let mut x: u32 = 0;
        let mut maxh = 0;
        for mut panel in panels {
            let wraps = x > 0 && x.saturating_add(panel.width()) > CANVAS_WIDTH;
            if self.policy == OverflowPolicy::Wrap && wraps {
                x = 0;
                y = advance(y, maxh, within, index)?;
                maxh = 0;
            }
            panel.place(x, y);
            maxh = maxh.max(panel.height());
            x = advance(x, panel.width(), within, index)?;
            out.push(Placed::Panel(panel));
        }

        advance(y, maxh, within, index)
    }
}

/// Lay out a whole dashboard from the top with the default policy.
pub fn auto_layout<P: Geometry>(rows: Vec<Row<P>>) -> Result<Vec<Placed<P>>, LayoutError> {
    Ok(LayoutEngine::default().layout(rows, 0)?.panels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::GridPos;
    use crate::domain::panel::{Group, Panel};
    use proptest::prelude::*;

    fn panel(title: &str, w: u32, h: u32) -> Panel {
        Panel::titled(title, w, h)
    }

    fn positions(placed: &[Placed<Panel>]) -> Vec<GridPos> {
        placed.iter().map(Placed::grid_pos).collect()
    }

    #[test]
    fn test_two_panels_share_a_shelf() {
        let rows = vec![Row::Panels(vec![panel("A", 12, 9), panel("B", 12, 6)])];

        let layout = LayoutEngine::default().layout(rows, 0).unwrap();

        assert_eq!(
            positions(&layout.panels),
            vec![GridPos::new(0, 0, 12, 9), GridPos::new(12, 0, 12, 6)]
        );
        assert_eq!(layout.next_y, 9);
    }

    #[test]
    fn test_expanded_group_is_spliced() {
        let rows = vec![Row::Group(Group::new(
            "Resources",
            false,
            vec![Row::Panels(vec![panel("Memory", 24, 3)])],
        ))];

        let layout = LayoutEngine::default().layout(rows, 5).unwrap();

        assert_eq!(layout.panels.len(), 2);
        let header = layout.panels[0].as_header().unwrap();
        assert_eq!(header.title, "Resources");
        assert_eq!(header.grid_pos, GridPos::new(0, 5, 24, 1));
        assert!(header.panels.is_empty());
        assert_eq!(layout.panels[1].grid_pos(), GridPos::new(0, 6, 24, 3));
        assert_eq!(layout.next_y, 9);
    }

    #[test]
    fn test_collapsed_group_keeps_local_coordinates() {
        let rows = vec![
            Row::Panels(vec![panel("Top", 24, 4)]),
            Row::Group(Group::new(
                "TLS",
                true,
                vec![
                    Row::Panels(vec![panel("Requests", 12, 9), panel("Certs", 12, 9)]),
                    Row::Panels(vec![panel("Expiry", 24, 5)]),
                ],
            )),
            Row::Panels(vec![panel("Bottom", 24, 2)]),
        ];

        let layout = LayoutEngine::default().layout(rows, 0).unwrap();

        assert_eq!(layout.panels.len(), 3);
        let header = layout.panels[1].as_header().unwrap();
        assert!(header.collapsed);
        assert_eq!(header.grid_pos.y, 4);
        assert_eq!(
            positions(&header.panels),
            vec![
                GridPos::new(0, 0, 12, 9),
                GridPos::new(12, 0, 12, 9),
                GridPos::new(0, 9, 24, 5),
            ]
        );
        assert_eq!(layout.panels[2].grid_pos(), GridPos::new(0, 5, 24, 2));
        assert_eq!(layout.next_y, 7);
    }

    #[test]
    fn test_empty_group_still_takes_a_header_row() {
        let rows: Vec<Row<Panel>> = vec![
            Row::Group(Group::new("Overview", false, Vec::new())),
            Row::Group(Group::new("Details", true, Vec::new())),
        ];

        let layout = LayoutEngine::default().layout(rows, 0).unwrap();

        assert_eq!(layout.panels[0].grid_pos().y, 0);
        assert_eq!(layout.panels[1].grid_pos().y, 1);
        assert_eq!(layout.next_y, 2);
    }

    #[test]
    fn test_empty_panel_row_does_not_advance() {
        let rows = vec![Row::Panels(Vec::new()), Row::Panels(vec![panel("A", 6, 3)])];

        let layout = LayoutEngine::default().layout(rows, 2).unwrap();

        assert_eq!(layout.panels[0].grid_pos(), GridPos::new(0, 2, 6, 3));
        assert_eq!(layout.next_y, 5);
    }

    #[test]
    fn test_wrap_starts_new_shelf() {
        let rows = vec![Row::Panels(vec![
            panel("A", 8, 9),
            panel("B", 8, 9),
            panel("C", 8, 9),
            panel("D", 6, 4),
            panel("E", 6, 4),
            panel("F", 6, 4),
            panel("G", 6, 4),
            panel("H", 6, 4),
        ])];

        let layout = LayoutEngine::new(OverflowPolicy::Wrap).layout(rows, 0).unwrap();

        let xy: Vec<(u32, u32)> = layout
            .panels
            .iter()
            .map(|p| (p.grid_pos().x, p.grid_pos().y))
            .collect();
        assert_eq!(
            xy,
            vec![(0, 0), (8, 0), (16, 0), (0, 9), (6, 9), (12, 9), (18, 9), (0, 13)]
        );
        assert_eq!(layout.next_y, 17);
    }

    #[test]
    fn test_wrap_keeps_oversized_panel_at_origin() {
        let rows = vec![Row::Panels(vec![panel("Wide", 30, 2), panel("Next", 6, 3)])];

        let layout = LayoutEngine::new(OverflowPolicy::Wrap).layout(rows, 0).unwrap();

        assert_eq!(layout.panels[0].grid_pos(), GridPos::new(0, 0, 30, 2));
        assert_eq!(layout.panels[1].grid_pos(), GridPos::new(0, 2, 6, 3));
        assert_eq!(layout.next_y, 5);
    }

    #[test]
    fn test_ignore_lets_row_overflow() {
        let rows = vec![Row::Panels(vec![panel("A", 16, 3), panel("B", 16, 5)])];

        let layout = LayoutEngine::new(OverflowPolicy::Ignore).layout(rows, 0).unwrap();

        assert_eq!(layout.panels[1].grid_pos(), GridPos::new(16, 0, 16, 5));
        assert_eq!(layout.next_y, 5);
    }

    #[test]
    fn test_reject_names_offending_row() {
        let rows = vec![Row::Group(Group::new(
            "Service Metrics",
            false,
            vec![
                Row::Panels(vec![panel("A", 12, 3)]),
                Row::Panels(vec![panel("B", 12, 3), panel("C", 8, 3), panel("D", 8, 3)]),
            ],
        ))];

        let err = LayoutEngine::new(OverflowPolicy::Reject).layout(rows, 0).unwrap_err();

        assert_eq!(
            err,
            LayoutError::Overflow {
                group: Some("Service Metrics".to_string()),
                row: 1,
                width: 28,
            }
        );
        assert_eq!(
            err.to_string(),
            "row 1 of group 'Service Metrics' is 28 grid units wide, canvas is 24"
        );
    }

    #[test]
    fn test_group_at_last_coordinate_overflows() {
        let rows: Vec<Row<Panel>> = vec![Row::Group(Group::new("G", false, Vec::new()))];

        let err = LayoutEngine::default().layout(rows, u32::MAX).unwrap_err();

        assert_eq!(err, LayoutError::CoordinateOverflow { group: None, row: 0 });
        assert_eq!(err.to_string(), "row 0 of the dashboard runs past the largest grid coordinate");
    }

    #[test]
    fn test_group_just_below_last_coordinate_fits() {
        let rows: Vec<Row<Panel>> = vec![Row::Group(Group::new("G", true, Vec::new()))];

        let layout = LayoutEngine::default().layout(rows, u32::MAX - 1).unwrap();

        assert_eq!(layout.panels[0].grid_pos().y, u32::MAX - 1);
        assert_eq!(layout.next_y, u32::MAX);
    }

    #[test]
    fn test_tall_rows_overflow_instead_of_panicking() {
        let rows = vec![
            Row::Panels(vec![panel("A", 24, 3_000_000_000)]),
            Row::Panels(vec![panel("B", 24, 3_000_000_000)]),
        ];

        for policy in [OverflowPolicy::Wrap, OverflowPolicy::Ignore, OverflowPolicy::Reject] {
            let err = LayoutEngine::new(policy).layout(rows.clone(), 0).unwrap_err();
            assert_eq!(err, LayoutError::CoordinateOverflow { group: None, row: 1 });
        }
    }

    #[test]
    fn test_wrapped_shelf_overflow_names_group() {
        let rows = vec![Row::Group(Group::new(
            "Tall",
            true,
            vec![Row::Panels(vec![
                panel("A", 24, u32::MAX),
                panel("B", 24, 1),
                panel("C", 24, 1),
            ])],
        ))];

        let err = LayoutEngine::new(OverflowPolicy::Wrap).layout(rows, 0).unwrap_err();

        assert_eq!(
            err,
            LayoutError::CoordinateOverflow {
                group: Some("Tall".to_string()),
                row: 0,
            }
        );
    }

    #[test]
    fn test_huge_widths_are_reported_not_summed_past_range() {
        let rows = vec![Row::Panels(vec![panel("A", u32::MAX, 1), panel("B", u32::MAX, 1)])];

        let err = LayoutEngine::new(OverflowPolicy::Reject).layout(rows, 0).unwrap_err();

        assert_eq!(
            err,
            LayoutError::Overflow {
                group: None,
                row: 0,
                width: u32::MAX,
            }
        );
    }

    #[test]
    fn test_reject_accepts_exact_fit() {
        let rows = vec![Row::Panels(vec![panel("A", 8, 3), panel("B", 8, 3), panel("C", 8, 3)])];
        assert!(LayoutEngine::new(OverflowPolicy::Reject).layout(rows, 0).is_ok());
    }

    #[test]
    fn test_auto_layout_starts_at_top() {
        let rows = vec![
            Row::Group(Group::new("Overview", false, vec![Row::Panels(vec![panel("A", 24, 3)])])),
            Row::Panels(vec![panel("B", 24, 3)]),
        ];

        let placed = auto_layout(rows).unwrap();

        let ys: Vec<u32> = placed.iter().map(|p| p.grid_pos().y).collect();
        assert_eq!(ys, vec![0, 1, 4]);
    }

    #[test]
    fn test_policy_deserializes_lowercase() {
        let policy: OverflowPolicy = serde_json::from_str(r#""reject""#).unwrap();
        assert_eq!(policy, OverflowPolicy::Reject);
    }

    /// Geometry-only panel tagged with the input row it came from.
    #[derive(Debug, Clone, PartialEq)]
    struct Tile {
        row: usize,
        pos: GridPos,
    }

    impl Geometry for Tile {
        fn grid_pos(&self) -> GridPos {
            self.pos
        }

        fn grid_pos_mut(&mut self) -> &mut GridPos {
            &mut self.pos
        }
    }

    fn tile_rows(sizes: Vec<Vec<(u32, u32)>>) -> Vec<Row<Tile>> {
        sizes
            .into_iter()
            .enumerate()
            .map(|(row, sizes)| {
                Row::Panels(
                    sizes
                        .into_iter()
                        .map(|(w, h)| Tile {
                            row,
                            pos: GridPos::sized(w, h),
                        })
                        .collect(),
                )
            })
            .collect()
    }

    /// Panel rows whose widths never exceed the canvas.
    fn fitting_rows() -> impl Strategy<Value = Vec<Vec<(u32, u32)>>> {
        let row = prop::collection::vec((1u32..=12, 0u32..=12), 0..5).prop_map(|sizes| {
            let mut used = 0;
            sizes
                .into_iter()
                .take_while(|(w, _)| {
                    used += w;
                    used <= CANVAS_WIDTH
                })
                .collect::<Vec<_>>()
        });
        prop::collection::vec(row, 0..6)
    }

    fn any_rows() -> impl Strategy<Value = Vec<Vec<(u32, u32)>>> {
        prop::collection::vec(prop::collection::vec((1u32..=24, 0u32..=12), 0..8), 0..6)
    }

    fn panels_of(layout: &Layout<Tile>) -> Vec<Tile> {
        layout.panels.iter().filter_map(Placed::as_panel).cloned().collect()
    }

    proptest! {
        #[test]
        fn fitting_rows_stay_on_canvas_without_overlap(sizes in fitting_rows(), y0 in 0u32..50) {
            for policy in [OverflowPolicy::Wrap, OverflowPolicy::Ignore, OverflowPolicy::Reject] {
                let layout = LayoutEngine::new(policy).layout(tile_rows(sizes.clone()), y0).unwrap();
                let tiles = panels_of(&layout);

                for tile in &tiles {
                    prop_assert!(tile.pos.right() <= CANVAS_WIDTH);
                }
                for (i, a) in tiles.iter().enumerate() {
                    for b in &tiles[i + 1..] {
                        if a.row == b.row {
                            prop_assert_eq!(a.pos.y, b.pos.y);
                            prop_assert!(!a.pos.overlaps_horizontally(&b.pos));
                        }
                    }
                }

                let expected: u32 = y0 + sizes
                    .iter()
                    .map(|row| row.iter().map(|(_, h)| *h).max().unwrap_or(0))
                    .sum::<u32>();
                prop_assert_eq!(layout.next_y, expected);
            }
        }

        #[test]
        fn y_never_decreases(sizes in any_rows(), y0 in 0u32..50) {
            for policy in [OverflowPolicy::Wrap, OverflowPolicy::Ignore] {
                let layout = LayoutEngine::new(policy).layout(tile_rows(sizes.clone()), y0).unwrap();
                let ys: Vec<u32> = layout.panels.iter().map(|p| p.grid_pos().y).collect();

                prop_assert!(ys.windows(2).all(|pair| pair[0] <= pair[1]));
                prop_assert!(ys.iter().all(|y| *y >= y0 && *y <= layout.next_y));
            }
        }

        #[test]
        fn wrap_keeps_narrow_panels_on_canvas(sizes in any_rows()) {
            let layout = LayoutEngine::new(OverflowPolicy::Wrap).layout(tile_rows(sizes), 0).unwrap();
            for tile in panels_of(&layout) {
                prop_assert!(tile.pos.right() <= CANVAS_WIDTH);
            }
        }

        #[test]
        fn collapsed_group_is_isolated(sizes in fitting_rows(), y0 in 0u32..50) {
            let nested = tile_rows(sizes.clone());
            let alone = LayoutEngine::default().layout(nested.clone(), 0).unwrap();
            let rows = vec![Row::Group(Group::new("Collapsed", true, nested))];

            let layout = LayoutEngine::default().layout(rows, y0).unwrap();

            prop_assert_eq!(layout.panels.len(), 1);
            prop_assert_eq!(layout.next_y, y0 + GROUP_HEADER_HEIGHT);
            let header = layout.panels[0].as_header().unwrap();
            prop_assert_eq!(header.grid_pos.y, y0);
            prop_assert_eq!(&header.panels, &alone.panels);
            if let Some(first) = header.panels.first() {
                prop_assert_eq!(first.grid_pos().y, 0);
            }
        }

        #[test]
        fn expanded_group_is_spliced_below_header(sizes in fitting_rows(), y0 in 0u32..50) {
            let nested = tile_rows(sizes.clone());
            let alone = LayoutEngine::default().layout(nested.clone(), y0 + 1).unwrap();
            let rows = vec![Row::Group(Group::new("Expanded", false, nested))];

            let layout = LayoutEngine::default().layout(rows, y0).unwrap();

            let header = layout.panels[0].as_header().unwrap();
            prop_assert_eq!(header.grid_pos.y, y0);
            prop_assert!(header.panels.is_empty());
            prop_assert_eq!(&layout.panels[1..], &alone.panels[..]);
            prop_assert_eq!(layout.next_y, alone.next_y);
        }
    }
}
