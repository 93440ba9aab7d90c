pub mod entity_page;
