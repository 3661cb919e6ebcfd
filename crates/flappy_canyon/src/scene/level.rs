//! Deterministic level layout: a tiled floor strip plus obstacle columns
//! built from a 16x16 tile atlas. Everything here works in screen space
//! (origin top-left, y grows downward, coordinates are the top-left corner
//! of each tile); the scene module converts to world transforms when
//! spawning.

use thiserror::Error;

/// Source tile edge length in the atlas, logical units.
pub const TILE_SIZE: f32 = 16.0;

/// Uniform display scale for every sprite in the scene.
pub const TILE_SCALE: f32 = 2.5;

/// Placement stride: one scaled tile.
pub const SCALED_TILE_SIZE: f32 = TILE_SIZE * TILE_SCALE;

/// Atlas grid the frame indices refer to.
pub const ATLAS_COLUMNS: u32 = 8;
pub const ATLAS_ROWS: u32 = 6;

/// Floor frames, cycled in order across the whole strip.
const FLOOR_FRAMES: [usize; 4] = [40, 41, 42, 43];

/// Frame offset between a column's upper body row and the rows below it.
const BODY_FRAME_STEP: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelSpecError {
    #[error("column at x={x} must be at least 1x1 tile, got {width}x{height}")]
    EmptyColumn { x: i32, width: u32, height: u32 },
    #[error("sky column at x={x} needs a bottom frame of at least 8, got {bottom_frame}")]
    BodyFrameUnderflow { x: i32, bottom_frame: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// Part of the floor collision group.
    Floor,
    /// Part of the obstacle-column collision group.
    Column,
}

/// One tile emitted by the builder, immutable once placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub x: f32,
    pub y: f32,
    pub frame: usize,
    pub kind: TileKind,
}

/// Obstacle column description, consumed at build time only.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Origin x of the leftmost tile column.
    pub x: f32,
    /// Base frame of the cap row; column `col` uses `top_frame + col`.
    pub top_frame: usize,
    /// Base frame of the row next to the cap.
    pub bottom_frame: usize,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
}

impl ColumnSpec {
    fn validate(&self) -> Result<(), LevelSpecError> {
        if self.width == 0 || self.height == 0 {
            return Err(LevelSpecError::EmptyColumn {
                x: self.x as i32,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Tiles the band just above the bottom edge of the field, left to right,
/// cycling through the floor palette. The frame counter advances once per
/// tile placed, rows included.
pub fn floor_strip(field_width: f32, field_height: f32) -> Vec<PlacedTile> {
    let floor_start_y = field_height - SCALED_TILE_SIZE;
    let mut tiles = Vec::new();
    let mut palette = FLOOR_FRAMES.iter().copied().cycle();

    let mut x = 0.0;
    while x < field_width {
        let mut y = floor_start_y;
        while y < field_height {
            let frame = palette.next().expect("palette cycle never ends");
            tiles.push(PlacedTile {
                x,
                y,
                frame,
                kind: TileKind::Floor,
            });
            y += SCALED_TILE_SIZE;
        }
        x += SCALED_TILE_SIZE;
    }

    tiles
}

/// Builds an obstacle column standing on the floor. Row 0 is the cap
/// (`top_frame` palette), row 1 the upper body (`bottom_frame` palette), and
/// every row below repeats the extended body (`bottom_frame + 8`).
pub fn ground_column(spec: &ColumnSpec, floor_y: f32) -> Result<Vec<PlacedTile>, LevelSpecError> {
    spec.validate()?;

    let column_top = floor_y - SCALED_TILE_SIZE * spec.height as f32;
    let mut tiles = Vec::with_capacity((spec.width * spec.height) as usize);

    for row in 0..spec.height {
        for col in 0..spec.width {
            let frame = match row {
                0 => spec.top_frame + col as usize,
                1 => spec.bottom_frame + col as usize,
                _ => spec.bottom_frame + BODY_FRAME_STEP + col as usize,
            };
            tiles.push(PlacedTile {
                x: spec.x + col as f32 * SCALED_TILE_SIZE,
                y: column_top + row as f32 * SCALED_TILE_SIZE,
                frame,
                kind: TileKind::Column,
            });
        }
    }

    Ok(tiles)
}

/// Builds an obstacle column hanging from the ceiling (y = 0), growing
/// downward. The frame rule mirrors [`ground_column`] vertically: the lowest
/// row is the cap, the row above it the upper body, and everything above
/// that the extended body (`bottom_frame - 8`).
pub fn sky_column(spec: &ColumnSpec) -> Result<Vec<PlacedTile>, LevelSpecError> {
    spec.validate()?;
    if spec.height >= 3 && spec.bottom_frame < BODY_FRAME_STEP {
        return Err(LevelSpecError::BodyFrameUnderflow {
            x: spec.x as i32,
            bottom_frame: spec.bottom_frame,
        });
    }

    let mut tiles = Vec::with_capacity((spec.width * spec.height) as usize);

    for row in 0..spec.height {
        for col in 0..spec.width {
            let frame = if row == spec.height - 1 {
                spec.top_frame + col as usize
            } else if row + 2 == spec.height {
                spec.bottom_frame + col as usize
            } else {
                spec.bottom_frame - BODY_FRAME_STEP + col as usize
            };
            tiles.push(PlacedTile {
                x: spec.x + col as f32 * SCALED_TILE_SIZE,
                y: row as f32 * SCALED_TILE_SIZE,
                frame,
                kind: TileKind::Column,
            });
        }
    }

    Ok(tiles)
}

/// The fixed canyon layout of the game: floor strip plus three ground and
/// three sky columns.
pub fn canyon_layout(
    field_width: f32,
    field_height: f32,
) -> Result<Vec<PlacedTile>, LevelSpecError> {
    let floor_y = field_height - SCALED_TILE_SIZE;

    let ground = |x: f32, height: u32| ColumnSpec {
        x,
        top_frame: 0,
        bottom_frame: 8,
        width: 2,
        height,
    };
    let sky = |x: f32, height: u32| ColumnSpec {
        x,
        top_frame: 32,
        bottom_frame: 24,
        width: 2,
        height,
    };

    let mut tiles = floor_strip(field_width, field_height);
    tiles.extend(ground_column(&ground(100.0, 4), floor_y)?);
    tiles.extend(sky_column(&sky(150.0, 6))?);
    tiles.extend(ground_column(&ground(350.0, 8), floor_y)?);
    tiles.extend(sky_column(&sky(350.0, 3))?);
    tiles.extend(ground_column(&ground(500.0, 3), floor_y)?);
    tiles.extend(sky_column(&sky(550.0, 8))?);

    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_frames(tiles: &[PlacedTile], row_y: f32) -> Vec<usize> {
        tiles
            .iter()
            .filter(|tile| (tile.y - row_y).abs() < f32::EPSILON)
            .map(|tile| tile.frame)
            .collect()
    }

    #[test]
    fn floor_strip_tiles_the_full_width() {
        let tiles = floor_strip(800.0, 600.0);
        // One row of ceil(800 / 40) tiles.
        assert_eq!(tiles.len(), 20);
        assert!(tiles.iter().all(|tile| tile.kind == TileKind::Floor));
        assert!(
            tiles
                .iter()
                .all(|tile| (tile.y - 560.0).abs() < f32::EPSILON)
        );
    }

    #[test]
    fn floor_strip_rounds_partial_tiles_up() {
        let tiles = floor_strip(810.0, 600.0);
        assert_eq!(tiles.len(), 21, "a partial rightmost tile is still placed");
    }

    #[test]
    fn floor_frames_cycle_through_the_palette_in_order() {
        let tiles = floor_strip(800.0, 600.0);
        for (counter, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.frame, 40 + counter % 4);
        }
    }

    #[test]
    fn ground_column_frames_and_rows() {
        let spec = ColumnSpec {
            x: 100.0,
            top_frame: 0,
            bottom_frame: 8,
            width: 2,
            height: 4,
        };
        let tiles = ground_column(&spec, 560.0).expect("valid spec");
        assert_eq!(tiles.len(), 8);
        assert!(tiles.iter().all(|tile| tile.kind == TileKind::Column));

        // Rows grow downward starting at floor_y - height * stride.
        let top = 560.0 - 4.0 * SCALED_TILE_SIZE;
        assert_eq!(row_frames(&tiles, top), vec![0, 1]);
        assert_eq!(row_frames(&tiles, top + SCALED_TILE_SIZE), vec![8, 9]);
        assert_eq!(
            row_frames(&tiles, top + 2.0 * SCALED_TILE_SIZE),
            vec![16, 17]
        );
        assert_eq!(
            row_frames(&tiles, top + 3.0 * SCALED_TILE_SIZE),
            vec![16, 17]
        );

        let mut ys: Vec<f32> = tiles.iter().map(|tile| tile.y).collect();
        ys.dedup();
        assert!(
            ys.windows(2).all(|pair| pair[0] < pair[1]),
            "tile rows must be strictly increasing downward"
        );
    }

    #[test]
    fn sky_column_mirrors_the_frame_rule_vertically() {
        let spec = ColumnSpec {
            x: 150.0,
            top_frame: 32,
            bottom_frame: 24,
            width: 2,
            height: 6,
        };
        let tiles = sky_column(&spec).expect("valid spec");
        assert_eq!(tiles.len(), 12);

        // Anchored at the ceiling: row 0 sits at y = 0.
        assert_eq!(row_frames(&tiles, 5.0 * SCALED_TILE_SIZE), vec![32, 33]);
        assert_eq!(row_frames(&tiles, 4.0 * SCALED_TILE_SIZE), vec![24, 25]);
        for row in 0..4 {
            assert_eq!(
                row_frames(&tiles, row as f32 * SCALED_TILE_SIZE),
                vec![16, 17]
            );
        }
    }

    #[test]
    fn single_row_columns_only_emit_cap_frames() {
        let spec = ColumnSpec {
            x: 0.0,
            top_frame: 0,
            bottom_frame: 8,
            width: 2,
            height: 1,
        };
        let ground = ground_column(&spec, 560.0).expect("valid spec");
        assert_eq!(
            ground.iter().map(|tile| tile.frame).collect::<Vec<_>>(),
            vec![0, 1]
        );

        let spec = ColumnSpec {
            x: 0.0,
            top_frame: 32,
            bottom_frame: 24,
            width: 2,
            height: 1,
        };
        let sky = sky_column(&spec).expect("valid spec");
        assert_eq!(
            sky.iter().map(|tile| tile.frame).collect::<Vec<_>>(),
            vec![32, 33]
        );
    }

    #[test]
    fn zero_sized_columns_are_rejected() {
        let spec = ColumnSpec {
            x: 10.0,
            top_frame: 0,
            bottom_frame: 8,
            width: 0,
            height: 4,
        };
        assert_eq!(
            ground_column(&spec, 560.0),
            Err(LevelSpecError::EmptyColumn {
                x: 10,
                width: 0,
                height: 4
            })
        );

        let spec = ColumnSpec {
            x: 10.0,
            top_frame: 32,
            bottom_frame: 24,
            width: 2,
            height: 0,
        };
        assert_eq!(
            sky_column(&spec),
            Err(LevelSpecError::EmptyColumn {
                x: 10,
                width: 2,
                height: 0
            })
        );
    }

    #[test]
    fn tall_sky_column_with_low_bottom_frame_is_rejected() {
        let spec = ColumnSpec {
            x: 10.0,
            top_frame: 32,
            bottom_frame: 4,
            width: 2,
            height: 3,
        };
        assert_eq!(
            sky_column(&spec),
            Err(LevelSpecError::BodyFrameUnderflow {
                x: 10,
                bottom_frame: 4
            })
        );
    }

    #[test]
    fn canyon_layout_places_every_tile() {
        let tiles = canyon_layout(800.0, 600.0).expect("layout is valid");
        // 20 floor tiles plus 2-wide columns of heights 4, 6, 8, 3, 3, 8.
        assert_eq!(tiles.len(), 20 + 2 * (4 + 6 + 8 + 3 + 3 + 8));

        let max_frame = tiles.iter().map(|tile| tile.frame).max().unwrap_or(0);
        assert!(
            max_frame < (ATLAS_COLUMNS * ATLAS_ROWS) as usize,
            "every frame must exist in the atlas"
        );
    }
}
