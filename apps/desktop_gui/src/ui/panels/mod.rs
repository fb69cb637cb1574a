pub mod measurements;
pub mod result_view;
pub mod uploader;
