pub mod formatter;

pub use formatter::{
    format_age, format_breakdown, format_last_updated, format_points, format_standings_table,
    format_standings_tsv, format_wins, should_use_colors,
};
