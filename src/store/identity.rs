use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::types::{Profile, User};

use super::io::write_atomic_overwrite;

fn users_path(data_dir: &std::path::Path) -> std::path::PathBuf {
    data_dir.join("users.json")
}

fn profiles_path(data_dir: &std::path::Path) -> std::path::PathBuf {
    data_dir.join("profiles.json")
}

pub(crate) fn load_identities(
    data_dir: &std::path::Path,
) -> Result<(HashMap<String, User>, HashMap<String, Profile>)> {
    let users: HashMap<String, User> = if users_path(data_dir).exists() {
        let bytes = std::fs::read(users_path(data_dir)).context("read users.json")?;
        let list: Vec<User> = serde_json::from_slice(&bytes).context("parse users.json")?;
        list.into_iter().map(|u| (u.id.clone(), u)).collect()
    } else {
        HashMap::new()
    };

    let profiles: HashMap<String, Profile> = if profiles_path(data_dir).exists() {
        let bytes = std::fs::read(profiles_path(data_dir)).context("read profiles.json")?;
        let list: Vec<Profile> = serde_json::from_slice(&bytes).context("parse profiles.json")?;
        list.into_iter().map(|p| (p.user_id.clone(), p)).collect()
    } else {
        HashMap::new()
    };

    Ok((users, profiles))
}

pub(crate) fn persist_identities(
    data_dir: &std::path::Path,
    users: &HashMap<String, User>,
    profiles: &HashMap<String, Profile>,
) -> Result<()> {
    let mut user_list: Vec<User> = users.values().cloned().collect();
    user_list.sort_by(|a, b| a.username.cmp(&b.username));
    let users_bytes = serde_json::to_vec_pretty(&user_list).context("serialize users")?;
    write_atomic_overwrite(&users_path(data_dir), &users_bytes).context("write users.json")?;

    let mut profile_list: Vec<Profile> = profiles.values().cloned().collect();
    profile_list.sort_by(|a, b| a.user_id.cmp(&b.user_id));
    let profiles_bytes = serde_json::to_vec_pretty(&profile_list).context("serialize profiles")?;
    write_atomic_overwrite(&profiles_path(data_dir), &profiles_bytes)
        .context("write profiles.json")?;

    Ok(())
}
