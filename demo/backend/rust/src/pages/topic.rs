/* demo/backend/rust/src/pages/topic.rs */

use axum::extract::Path;
use axum::response::Response;
use quire_server::{OptionsBag, RenderError};
use quire_server_axum::{AxumError, Renderer};
use serde_json::json;

struct TopicData {
  tid: u64,
  title: &'static str,
  posts: &'static [&'static str],
}

const TOPICS: &[TopicData] = &[
  TopicData { tid: 1, title: "Welcome to the forum", posts: &["Hello!", "Glad to be here."] },
  TopicData { tid: 2, title: "Release notes", posts: &["Version 1 is out."] },
];

pub async fn home(renderer: Renderer) -> Result<Response, AxumError> {
  let mut options = OptionsBag::default();
  let topics: Vec<_> = TOPICS.iter().map(|t| json!({ "tid": t.tid, "title": t.title })).collect();
  options.insert("topics", topics);
  renderer.render("home", options).await
}

pub async fn topic(Path(tid): Path<u64>, renderer: Renderer) -> Result<Response, AxumError> {
  let mut options = OptionsBag::default();
  options.insert("tid", tid);
  // Topic 0 never exists; the build hook redirects it.
  if tid != 0 {
    let topic = TOPICS
      .iter()
      .find(|t| t.tid == tid)
      .ok_or_else(|| RenderError::not_found(format!("Topic {tid} not found")))?;
    options.insert("title", topic.title);
    options.insert("posts", topic.posts.to_vec());
  }
  renderer.render("topic", options).await
}

pub async fn admin_dashboard(mut renderer: Renderer) -> Result<Response, AxumError> {
  let locals = renderer.locals_mut();
  locals.render_header = false;
  locals.render_admin_header = true;
  renderer.render("admin/dashboard", OptionsBag::default()).await
}
