pub mod dispatcher;
pub mod style;
pub mod text_edit;
pub mod view;

pub use dispatcher::{InteractionDispatcher, PointerEventKind};
pub use style::StyleConfig;
pub use text_edit::{TextEditHandle, TextEditRequest, TextEditor};
