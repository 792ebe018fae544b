mod ids;
mod track;

pub use ids::{DisplayKey, VideoId, VIDEO_ID_LEN};
pub use track::{embed_url, thumbnail_url, watch_url, Track, VideoInfo};
