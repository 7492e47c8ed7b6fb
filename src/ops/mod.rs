pub mod item_ops;
pub mod project_ops;
pub mod reorder;
