pub mod extract;
pub mod rules;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::debug;

use crate::record::Record;
use crate::reddit::Post;

const CHUNK_SIZE: usize = 500;

/// A parsed post and its completeness score.
#[derive(Debug, Clone)]
pub struct Scored {
    pub record: Record,
    pub confidence: f64,
}

impl Scored {
    pub fn new(record: Record) -> Self {
        let confidence = record.confidence();
        Self { record, confidence }
    }
}

/// Extract and score one post.
pub fn process_post(post: &Post) -> Scored {
    let record = extract::extract(&post.selftext, &post.url, post.link_flair_text.as_deref());
    let scored = Scored::new(record);
    debug!(id = %post.id, title = %post.title, confidence = scored.confidence, "Parsed post");
    scored
}

/// Extract every post in parallel chunks. Output order matches input order.
pub fn process_posts(posts: &[Post]) -> Vec<Scored> {
    let pb = ProgressBar::new(posts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut scored = Vec::with_capacity(posts.len());
    for chunk in posts.chunks(CHUNK_SIZE) {
        let results: Vec<Scored> = chunk.par_iter().map(process_post).collect();
        scored.extend(results);
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    scored
}
