//! Domain entities - the post itself and the transient state around it.

mod form;
mod navigation;
mod post;
mod toast;

pub use form::{Field, FormDraft, FormInput, FormKind, ImageFile, ImagePreview};
pub use navigation::{NavigationState, ViewKind};
pub use post::{Post, PostFields, generate_id, parse_post_date, sample_posts, today};
pub use toast::{Toast, ToastKind, ToastState};
