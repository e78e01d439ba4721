mod chart;

pub use chart::{build_figure, generate_chart, MIN_CHART_HEIGHT, PLOTLY_CDN_URL};
