pub mod gemini_client;
pub mod supabase_auth;
pub mod supabase_store;

pub use gemini_client::GeminiClient;
pub use supabase_auth::SupabaseAuthProvider;
pub use supabase_store::SupabaseRecordStore;
