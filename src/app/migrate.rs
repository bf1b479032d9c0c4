use crate::core::maintenance::{change_tag_to_category, retype_post, PostType, WpPost};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct MigrationPlan {
    pub post_type: Option<PostType>,
    pub tags_to_categories: bool,
    pub existing_categories: HashSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrationReport {
    pub posts: usize,
    pub retyped: usize,
    pub tags_moved: usize,
}

pub fn migrate_posts(posts: &mut [WpPost], plan: &MigrationPlan) -> MigrationReport {
    let mut report = MigrationReport {
        posts: posts.len(),
        ..MigrationReport::default()
    };

    for post in posts.iter_mut() {
        if let Some(post_type) = plan.post_type {
            retype_post(post, post_type);
            report.retyped += 1;
        }
        if plan.tags_to_categories {
            report.tags_moved += change_tag_to_category(post, &plan.existing_categories).len();
        }
    }

    report
}

/// Reads a JSON array of posts, migrates it and writes the result to `output`.
pub async fn migrate_posts_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    plan: &MigrationPlan,
) -> Result<MigrationReport> {
    let data = tokio::fs::read(input.as_ref()).await?;
    let mut posts: Vec<WpPost> = serde_json::from_slice(&data)?;

    let report = migrate_posts(&mut posts, plan);

    if let Some(parent) = output.as_ref().parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(output.as_ref(), serde_json::to_vec_pretty(&posts)?).await?;

    tracing::info!(
        "Migrated {} posts ({} retyped, {} tags moved)",
        report.posts,
        report.retyped,
        report.tags_moved
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_migrate_posts_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("posts.json");
        let output = temp_dir.path().join("out/posts.json");

        std::fs::write(
            &input,
            serde_json::json!([
                {"id": 1, "post_type": "post", "tags": ["ethos-integridade"], "categories": ["parcerias"]},
                {"id": 2, "post_type": "post"}
            ])
            .to_string(),
        )
        .unwrap();

        let plan = MigrationPlan {
            post_type: Some(PostType::Iniciativa),
            tags_to_categories: true,
            existing_categories: ["ethos-integridade".to_string()].into_iter().collect(),
        };

        let report = migrate_posts_file(&input, &output, &plan).await.unwrap();
        assert_eq!(
            report,
            MigrationReport {
                posts: 2,
                retyped: 2,
                tags_moved: 1
            }
        );

        let migrated: Vec<WpPost> =
            serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(migrated[0].post_type, "iniciativa");
        assert_eq!(migrated[0].tags, vec!["parcerias"]);
        assert_eq!(migrated[0].categories, vec!["parcerias", "ethos-integridade"]);
        assert!(migrated[1].tags.is_empty());
    }
}
