use crate::NewUser;

/// Returns the built-in dataset seeded by the CLI when no seed file is given.
///
/// # Examples
///
/// ```
/// let users = userbase_core::sample_users();
/// assert_eq!(users[1].name, "Maria");
/// ```
pub fn sample_users() -> Vec<NewUser> {
    vec![
        NewUser::new("Aleksey", Some(28), "aleksey@example.com"),
        NewUser::new("Maria", Some(34), "maria@example.com"),
        NewUser::new("Ivan", Some(45), "ivan@example.com"),
    ]
}
