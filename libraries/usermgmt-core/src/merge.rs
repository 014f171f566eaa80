//! Partial update merge

use crate::types::{User, UserPatch};

/// Overlay the supplied fields of `patch` onto `current`
///
/// Empty strings, a zero age and an unspecified status keep the current
/// value. The id is never touched.
pub fn merge(current: &User, patch: &UserPatch) -> User {
    User {
        id: current.id,
        first_name: pick_str(&current.first_name, &patch.first_name),
        last_name: pick_str(&current.last_name, &patch.last_name),
        email: pick_str(&current.email, &patch.email),
        phone: pick_str(&current.phone, &patch.phone),
        age: if patch.age == 0 { current.age } else { patch.age },
        status: if patch.status.is_unspecified() {
            current.status
        } else {
            patch.status
        },
    }
}

fn pick_str(current: &str, incoming: &str) -> String {
    if incoming.is_empty() {
        current.to_string()
    } else {
        incoming.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{UserId, UserStatus};
    use proptest::prelude::*;

    fn current() -> User {
        User {
            id: UserId::generate(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            phone: "+12025550100".to_string(),
            age: 85,
            status: UserStatus::Active,
        }
    }

    #[test]
    fn email_only_patch_changes_only_email() {
        let user = current();
        let patch = UserPatch {
            email: "sample@gmail.com".to_string(),
            ..UserPatch::default()
        };

        let merged = merge(&user, &patch);

        assert_eq!(merged.email, "sample@gmail.com");
        assert_eq!(merged.first_name, user.first_name);
        assert_eq!(merged.last_name, user.last_name);
        assert_eq!(merged.phone, user.phone);
        assert_eq!(merged.age, user.age);
        assert_eq!(merged.status, user.status);
        assert_eq!(merged.id, user.id);
    }

    #[test]
    fn full_patch_overwrites_everything_but_id() {
        let user = current();
        let patch = UserPatch {
            first_name: "Alan".to_string(),
            last_name: "Turing".to_string(),
            email: "alan@bletchley.uk".to_string(),
            phone: "+441234567890".to_string(),
            age: 41,
            status: UserStatus::Inactive,
        };

        let merged = merge(&user, &patch);

        assert_eq!(merged.id, user.id);
        assert_eq!(merged.first_name, "Alan");
        assert_eq!(merged.last_name, "Turing");
        assert_eq!(merged.email, "alan@bletchley.uk");
        assert_eq!(merged.phone, "+441234567890");
        assert_eq!(merged.age, 41);
        assert_eq!(merged.status, UserStatus::Inactive);
    }

    fn status_strategy() -> impl Strategy<Value = UserStatus> {
        prop_oneof![
            Just(UserStatus::Unspecified),
            Just(UserStatus::Active),
            Just(UserStatus::Inactive),
        ]
    }

    prop_compose! {
        fn patch_strategy()(
            first_name in "(|[a-zA-Z]{2,50})",
            last_name in "(|[a-zA-Z]{2,50})",
            email in "(|[a-z]{1,10}@[a-z]{1,10}\\.com)",
            phone in "(|\\+[1-9][0-9]{7,13})",
            age in 0i64..=150,
            status in status_strategy(),
        ) -> UserPatch {
            UserPatch { first_name, last_name, email, phone, age, status }
        }
    }

    proptest! {
        #[test]
        fn merge_is_idempotent(patch in patch_strategy()) {
            let user = current();
            let once = merge(&user, &patch);
            let twice = merge(&once, &patch);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn empty_patch_never_clears_a_field(age in 1i64..=150, inactive in any::<bool>()) {
            let mut user = current();
            user.age = age;
            user.status = if inactive { UserStatus::Inactive } else { UserStatus::Active };

            prop_assert_eq!(merge(&user, &UserPatch::default()), user);
        }

        #[test]
        fn merge_keeps_id(patch in patch_strategy()) {
            let user = current();
            prop_assert_eq!(merge(&user, &patch).id, user.id);
        }
    }
}
