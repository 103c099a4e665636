pub mod excuse;
pub mod history;
pub mod proof;
pub mod settings;
pub mod storage;

pub use excuse::*;
pub use history::*;
pub use proof::*;
pub use settings::*;
pub use storage::*;
