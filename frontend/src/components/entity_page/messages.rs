use panel::crud::ReorderReply;
use panel::form::{Record, StagedFile};
use panel::modal::{FetchTicket, SubmitTicket};

pub enum Msg {
    /// Re-fetch the listing.
    Refresh,
    Listed(panel::Result<Vec<Record>>),
    OpenCreate,
    OpenEdit(i64),
    Fetched(FetchTicket, panel::Result<Record>),
    /// A text control changed: field name and its new value.
    Input(String, String),
    FilePicked(String, web_sys::File),
    FileStaged(String, StagedFile),
    Submit,
    Submitted(SubmitTicket, panel::Result<Record>),
    Close,
    Delete(i64),
    Deleted(panel::Result<()>),
    DragStart(i64),
    /// The dragged row hovers over position `usize`.
    DragOver(usize),
    Drop,
    DragEnd,
    Reordered(panel::Result<ReorderReply>),
}
