mod add;
mod check;
mod completion;
mod generate;
mod list;
mod remove;
mod reorder;

pub use add::{add, Args as AddArgs};
pub use check::check;
pub use completion::{completion, Args as CompletionArgs};
pub use generate::{generate, Args as GenerateArgs};
pub use list::{list, Args as ListArgs};
pub use remove::{remove, Args as RemoveArgs};
pub use reorder::{move_down, move_up, Args as MoveArgs};
