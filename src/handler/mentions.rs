use crate::error::{Result, SlackLogError};
use crate::slack::{ChatApi, DirectoryMember, UserId};

/// Resolve user names to directory ids with a single directory fetch.
///
/// Every name must resolve; the first matching member in directory order
/// wins. Returns an empty list without touching the directory when there is
/// nothing to resolve.
pub async fn resolve_mentions<C: ChatApi>(client: &C, names: &[String]) -> Result<Vec<UserId>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let directory = client.list_users().await?;
    tracing::debug!(
        members = directory.len(),
        requested = names.len(),
        "Resolving mention users"
    );

    match_names(&directory, names)
}

fn match_names(directory: &[DirectoryMember], names: &[String]) -> Result<Vec<UserId>> {
    names
        .iter()
        .map(|name| -> Result<UserId> {
            let name = name.trim_start_matches('@');
            let member = directory
                .iter()
                .find(|member| member.name == name)
                .ok_or_else(|| SlackLogError::UserNotFound(name.to_string()))?;

            tracing::debug!(user = %name, user_id = %member.id.as_str(), "Resolved mention user");
            Ok(member.id.clone())
        })
        .collect()
}
