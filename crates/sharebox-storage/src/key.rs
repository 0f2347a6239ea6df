//! Object-key generation.
//!
//! Keys are minted once at upload time and never change afterwards, even
//! when the file or an ancestor folder is renamed or moved. The folder
//! path embedded in a key is a human-readable hint for operators browsing
//! the bucket, not an addressing mechanism.

use rand::distr::Alphanumeric;
use rand::RngExt;
use uuid::Uuid;

/// Build the object key for a new upload.
///
/// Shape: `{owner_id}/[{folder_path}/]{millis}-{rand}-{sanitized_name}`.
/// The timestamp-plus-random prefix makes collisions practically
/// impossible even for same-named files uploaded in the same millisecond.
pub fn generate_object_key(owner_id: Uuid, folder_path: Option<&str>, file_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let rand_part: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    let safe_name = sanitize_file_name(file_name);

    match folder_path {
        Some(path) if !path.is_empty() => {
            format!("{owner_id}/{path}/{millis}-{rand_part}-{safe_name}")
        }
        _ => format!("{owner_id}/{millis}-{rand_part}-{safe_name}"),
    }
}

/// Replace every character outside `[A-Za-z0-9._-]` with an underscore.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("report v2.docx"), "report_v2.docx");
        assert_eq!(sanitize_file_name("a/b\\c.txt"), "a_b_c.txt");
        assert_eq!(sanitize_file_name("ok-name_1.pdf"), "ok-name_1.pdf");
        assert_eq!(sanitize_file_name("日本語.txt"), "___.txt");
    }

    #[test]
    fn test_key_shape() {
        let owner = Uuid::new_v4();
        let key = generate_object_key(owner, Some("Projects/Q3"), "plan.xlsx");
        assert!(key.starts_with(&format!("{owner}/Projects/Q3/")));
        assert!(key.ends_with("-plan.xlsx"));

        let root_key = generate_object_key(owner, None, "plan.xlsx");
        assert!(root_key.starts_with(&format!("{owner}/")));
        assert!(!root_key.contains("//"));
    }

    #[test]
    fn test_keys_are_unique_for_same_name() {
        let owner = Uuid::new_v4();
        let a = generate_object_key(owner, None, "same.txt");
        let b = generate_object_key(owner, None, "same.txt");
        assert_ne!(a, b);
    }
}
