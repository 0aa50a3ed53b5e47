pub mod u501_resolve_branches;
pub mod u502_upload_attachments;
pub mod u503_category_tree;
pub mod u504_composite_save;
