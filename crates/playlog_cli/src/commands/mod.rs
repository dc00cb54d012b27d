//! Subcommand implementations. Each module exposes `execute`.

pub mod activity;
pub mod character;
pub mod earning;
pub mod export;
pub mod session;
pub mod snapshot;

use playlog_core::{Character, Repository};
use serde::Serialize;
use std::error::Error;

pub type CommandResult = Result<(), Box<dyn Error>>;

/// Prints `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Looks up the named character, or the active one when no name is given.
/// Never creates a character.
pub(crate) fn resolve_character(
    repo: &mut Repository,
    name: Option<&str>,
) -> Result<Character, Box<dyn Error>> {
    match name {
        Some(name) => repo
            .find_character(name)
            .ok_or_else(|| format!("no character named `{name}`").into()),
        None => active_character(repo),
    }
}

/// Like `resolve_character`, but creates the named character if absent.
pub(crate) fn resolve_or_create_character(
    repo: &mut Repository,
    name: Option<&str>,
) -> Result<Character, Box<dyn Error>> {
    match name {
        Some(name) => repo
            .get_or_create_character(name)
            .ok_or_else(|| format!("could not create character `{name}`").into()),
        None => active_character(repo),
    }
}

fn active_character(repo: &mut Repository) -> Result<Character, Box<dyn Error>> {
    repo.get_active_character()
        .ok_or_else(|| "no active character; pass --character or run `character activate`".into())
}

#[cfg(test)]
mod tests {
    use super::{resolve_character, resolve_or_create_character};
    use playlog_core::{Repository, StoreLocation};

    fn repository() -> Repository {
        let mut repo = Repository::new(StoreLocation::Memory);
        assert!(repo.initialize());
        repo
    }

    #[test]
    fn lookup_by_unknown_name_does_not_create_a_character() {
        let mut repo = repository();
        repo.get_or_create_character("Known").unwrap();

        let err = resolve_character(&mut repo, Some("Knwon")).unwrap_err();
        assert!(err.to_string().contains("Knwon"));
        assert_eq!(repo.get_all_characters().len(), 1);
        assert_eq!(
            resolve_character(&mut repo, Some("Known")).unwrap().name,
            "Known"
        );
    }

    #[test]
    fn missing_name_falls_back_to_active_character() {
        let mut repo = repository();
        assert!(resolve_character(&mut repo, None).is_err());

        let character = repo.get_or_create_character("Main").unwrap();
        assert!(repo.set_active_character(character.id));
        assert_eq!(resolve_character(&mut repo, None).unwrap().id, character.id);
    }

    #[test]
    fn session_start_path_creates_named_character() {
        let mut repo = repository();
        let created = resolve_or_create_character(&mut repo, Some("Newcomer")).unwrap();
        assert_eq!(created.name, "Newcomer");
        assert_eq!(repo.get_all_characters().len(), 1);
    }
}
