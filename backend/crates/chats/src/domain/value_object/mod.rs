pub mod chat_title;
