// Derived metrics and the view models built from them.
pub mod bands;
pub mod creatives;
pub mod funnel;
pub mod insights;
pub mod kpi;
pub mod ratio;
pub mod tables;
