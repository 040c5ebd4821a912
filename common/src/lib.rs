//! Ramen Report Common Library
//!
//! POSエクスポートの分類・集計・日報テキスト生成を行うコア

pub mod types;
pub mod text;
pub mod fields;
pub mod error;
pub mod payment;
pub mod product;
pub mod classify;
pub mod render;
pub mod reassign;

pub use types::{
    CellValue, CoursePeopleEntry, DateShift, OtherPayment, PaymentChannel, RamenCount, RamenVariant,
    ReportState, Row, SideDish, UnassignedItem,
};
pub use error::{Error, Result};
pub use classify::classify;
pub use render::render;
pub use reassign::{ReassignAction, ReassignOutcome};
