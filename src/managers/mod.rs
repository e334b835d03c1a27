// Bookmarks folder managers
// Folders handle CRUD and search over the records under one path prefix.

pub mod folder;
