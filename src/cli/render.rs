//! Rendering helpers for the list view and form feedback

use crate::domain::{FieldErrors, Notification, NotificationKind, User};

/// Local, case-insensitive substring filter over the name field.
///
/// Applied by the presentation layer to whatever the cache currently
/// holds; it never affects cache contents and is not persisted.
pub fn filter_by_name<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let needle = term.to_lowercase();
    users
        .iter()
        .filter(|user| user.name.to_lowercase().contains(&needle))
        .collect()
}

/// Print the user table the way the list view renders it.
pub fn print_table(users: &[&User]) {
    println!(
        "{:<6} {:<25} {:<30} {:<24} {:<15}",
        "Id", "Name", "Email", "Phone", "Username"
    );
    for user in users {
        println!(
            "{:<6} {:<25} {:<30} {:<24} {:<15}",
            user.id, user.name, user.email, user.phone, user.username
        );
    }
}

/// Annotate every offending field, like inline form errors.
pub fn print_field_errors(errors: &FieldErrors) {
    eprintln!("Invalid input:");
    for (field, message) in errors.iter() {
        eprintln!("  {}: {}", field, message);
    }
}

/// Print an outcome notification the way the toast area shows it.
pub fn print_notification(notification: &Notification) {
    match notification.kind {
        NotificationKind::Success => println!("{}", notification.message),
        NotificationKind::Failure => eprintln!("Error: {}", notification.message),
    }
}
