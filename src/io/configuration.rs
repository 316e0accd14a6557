//! Detection tuning constants and runtime configuration defaults
//!
//! These values were tuned empirically against real sprite sheets. Changing
//! any of them changes which grid a detector settles on.

// Shared sizing rules
/// Smallest cell edge, in pixels, any detector may report
pub const MINIMUM_CELL_SIZE: u32 = 4;

/// Cell sizes artists commonly use, tried before arbitrary divisors
pub const COMMON_CELL_SIZES: [u32; 10] = [8, 16, 24, 32, 48, 64, 96, 128, 256, 512];

// Connected-component noise filter
/// Upper bound on the minimum kept component edge length
pub const MAX_COMPONENT_MIN_DIMENSION: u32 = 16;
/// Lower bound on the minimum kept component edge length
pub const MIN_COMPONENT_MIN_DIMENSION: u32 = 2;
/// Upper bound on the minimum kept component area
pub const MAX_COMPONENT_MIN_AREA: u32 = 256;
/// Lower bound on the minimum kept component area
pub const MIN_COMPONENT_MIN_AREA: u32 = 4;

// Sprite-fit scoring
/// Fraction of a sprite's extent ignored on each side when scoring splits
pub const CORE_ZONE_MARGIN: f64 = 0.10;
/// Extra penalty weight when a sprite is split both ways
pub const COMPOUND_SEVERITY_FACTOR: f64 = 0.5;
/// Fit at or above which a count-derived grid is accepted without search
pub const SPRITE_FIT_ACCEPT: f64 = 0.5;
/// Fit below which a candidate grid is rejected outright
pub const SPRITE_FIT_HARD_FLOOR: f64 = 0.3;

// Transparency scoring
/// Weight of cell-interior opacity in the transparency score
pub const INTERIOR_OPACITY_WEIGHT: f64 = 0.5;
/// Lowest candidate score BoundaryScoring will report as a grid
pub const BOUNDARY_SCORE_FLOOR: f64 = 0.15;
/// Remainder strips at least this transparent are treated as padding
pub const SNAP_REMAINDER_TRANSPARENCY: f64 = 0.9;

// Grid inference from a sprite count
/// Texture aspect beyond which a single row or column is tried first
pub const EXTREME_ASPECT_RATIO: f64 = 4.0;
/// Cell aspect limit for accepting a single-row or single-column layout
pub const STRIP_CELL_ASPECT_LIMIT: f64 = 3.0;
/// Texture aspect beyond which extra rows (or columns) are penalised
pub const STRIP_TEXTURE_ASPECT: f64 = 2.0;
/// Aspect-error penalty per extra row on wide strips (columns on tall)
pub const STRIP_EXTRA_LINE_PENALTY: f64 = 0.1;
/// Approximate inference weight on any cell-count mismatch
pub const APPROX_COUNT_MISMATCH_WEIGHT: f64 = 10.0;
/// Approximate inference weight on empty (overcounted) cells
pub const APPROX_OVERCOUNT_WEIGHT: f64 = 15.0;

// Confidence for user-supplied sprite counts
/// Confidence when the derived cells are close to square
pub const USER_COUNT_BASE_CONFIDENCE: f64 = 0.9;
/// Ceiling reached when a strip's cells follow the strip orientation
pub const USER_COUNT_STRIP_CONFIDENCE: f64 = 0.95;
/// `|ln(aspect)|` thresholds and the confidence granted past each one
pub const USER_COUNT_ASPECT_STEPS: [(f64, f64); 3] = [(2.0, 0.5), (1.4, 0.6), (0.7, 0.75)];

// UniformGrid
/// Cell aspect range outside which UniformGrid halves its confidence
pub const UNIFORM_ASPECT_RANGE: (f64, f64) = (0.25, 4.0);
/// Weight of layout-to-texture aspect misalignment relative to cell squareness
pub const UNIFORM_LAYOUT_WEIGHT: f64 = 0.1;

// BoundaryScoring candidate search
/// Allowed cell count range relative to the detected sprite count
pub const CELL_COUNT_RANGE: (f64, f64) = (0.5, 2.0);
/// Multiplier for each axis that produces at least two cells
pub const MULTI_CELL_BONUS: f64 = 1.05;
/// Multiplier for power-of-two cell sizes
pub const POWER_OF_TWO_BONUS: f64 = 1.05;
/// Multiplier for square cells
pub const SQUARE_CELL_BONUS: f64 = 1.05;
/// Cell-count thresholds and their penalty multipliers, largest first
pub const EXCESSIVE_CELL_PENALTIES: [(u32, f64); 3] = [(100, 0.5), (64, 0.7), (32, 0.85)];
/// Bonus per doubling of the smaller cell edge over the minimum size
pub const CELL_SIZE_BONUS_PER_OCTAVE: f64 = 0.02;

// Centre clustering
/// Fraction of the smallest significant gap used as grouping tolerance
pub const GAP_TOLERANCE_FACTOR: f64 = 0.25;
/// Growth factor applied to the largest sprite when retrying a poor fit
pub const LARGEST_SPRITE_RETRY_SCALE: f64 = 1.1;
/// Confidence weights: grid consistency, count ratio, sprite fit
pub const CLUSTER_CONFIDENCE_WEIGHTS: (f64, f64, f64) = (0.4, 0.3, 0.3);

// Distance transform
/// Chamfer weight for a cardinal step
pub const CHAMFER_CARDINAL: u32 = 3;
/// Chamfer weight for a diagonal step
pub const CHAMFER_DIAGONAL: u32 = 4;
/// Fraction of the mean peak spacing used as suppression radius
pub const PEAK_SEPARATION_FACTOR: f64 = 0.4;
/// Smallest suppression radius, so plateau neighbours always merge
pub const MIN_PEAK_SEPARATION: f64 = 1.5;

// Region growing
/// Smallest coarse sampling window for seeds
pub const MIN_SEED_WINDOW: u32 = 8;
/// Texture edge divisor used to size the seed window
pub const SEED_WINDOW_DIVISOR: u32 = 16;
/// Maximum number of grown regions
pub const MAX_REGIONS: usize = 256;
/// Smallest region, in pixels, kept as a sprite
pub const MIN_REGION_AREA: usize = (MINIMUM_CELL_SIZE * MINIMUM_CELL_SIZE) as usize;

// Orchestration
/// Confidence at which AutoBest stops trying further algorithms
pub const AUTO_BEST_EARLY_STOP_CONFIDENCE: f64 = 0.90;

// Default values for configurable parameters
/// Default alpha threshold (fraction of 255) separating sprite from background
pub const DEFAULT_ALPHA_THRESHOLD: f32 = 0.1;

// Progress bar display settings
/// Width of the batch progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Fixture colours
/// HSV saturation of fixture sprite colours
pub const FIXTURE_SATURATION: f64 = 0.8;
/// HSV value of fixture sprite colours
pub const FIXTURE_VALUE: f64 = 0.9;
