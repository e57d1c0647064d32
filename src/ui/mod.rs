//! Presentation layer: egui widgets that draw a [`Dashboard`](titanic_eda::Dashboard)
//! and feed filter changes back into [`AppState`](titanic_eda::state::AppState).

pub mod charts;
pub mod panels;
pub mod table;
