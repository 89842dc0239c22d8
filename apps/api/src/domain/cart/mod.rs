// Cart domain module
// Cart lines, orders, total computation and the cart engine

pub mod engine;
pub mod line;
pub mod order;
pub mod totals;

pub use engine::CartEngine;
pub use line::CartLine;
pub use order::{Order, PaymentMethod};
pub use totals::{manual_sum, CartSummary, CartTotal, TotalSource};
