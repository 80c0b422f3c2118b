//! Image reconciliation for course updates.
//!
//! Given the images a course currently has, the list the client wants to keep
//! and the storage paths of freshly uploaded files, work out the new image
//! list and which stored files are no longer referenced. Pure; the caller does
//! the I/O.

use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePlan {
    /// New value of `images`: kept paths in submitted order, then uploads in upload order.
    pub images: Vec<String>,
    /// Current paths missing from the kept list, each listed once.
    pub to_delete: Vec<String>,
    /// Kept paths the course never had; dropped from `images`.
    pub ignored: Vec<String>,
}

pub fn plan_image_update(current: &[String], kept: &[String], uploaded: &[String]) -> ImagePlan {
    let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();
    let kept_set: HashSet<&str> = kept.iter().map(String::as_str).collect();

    let (valid_kept, ignored): (Vec<&String>, Vec<&String>) = kept
        .iter()
        .partition(|path| current_set.contains(path.as_str()));

    let mut seen: HashSet<&str> = HashSet::new();
    let mut to_delete = Vec::new();
    for path in current {
        if !kept_set.contains(path.as_str()) && seen.insert(path.as_str()) {
            to_delete.push(path.clone());
        }
    }

    let images = valid_kept
        .into_iter()
        .chain(uploaded.iter())
        .cloned()
        .collect();

    ImagePlan {
        images,
        to_delete,
        ignored: ignored.into_iter().cloned().collect(),
    }
}
