pub mod calculator;
pub mod courses;

pub async fn health() -> &'static str {
    "ok"
}
