use super::models::User;
use super::repository::UserRepository;
use crate::error::{ClinicError, ResourceKind};
use crate::persistence::{SledStore, get_json, insert_new};
use async_trait::async_trait;

const USERS_TREE: &str = "users";
const USERS_BY_EMAIL_TREE: &str = "users_by_email";

#[derive(Clone)]
pub struct SledUserRepository {
    store: SledStore,
}

impl SledUserRepository {
    pub fn new(store: SledStore) -> Self {
        Self { store }
    }

    fn users_tree(&self) -> Result<sled::Tree, ClinicError> {
        self.store.tree(USERS_TREE)
    }

    fn users_by_email_tree(&self) -> Result<sled::Tree, ClinicError> {
        self.store.tree(USERS_BY_EMAIL_TREE)
    }
}

#[async_trait]
impl UserRepository for SledUserRepository {
    async fn create(&self, user: User) -> Result<User, ClinicError> {
        let users_tree = self.users_tree()?;
        let email_tree = self.users_by_email_tree()?;

        // Claim the email first; the compare-and-swap is the uniqueness check
        email_tree
            .compare_and_swap(
                user.email.as_bytes(),
                None::<&[u8]>,
                Some(user.id.as_bytes()),
            )?
            .map_err(|_| ClinicError::AlreadyExists(ResourceKind::User))?;

        if let Err(e) = insert_new(&users_tree, user.id.as_bytes(), &user, ResourceKind::User) {
            email_tree.remove(user.email.as_bytes())?;
            return Err(e);
        }

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ClinicError> {
        let email_tree = self.users_by_email_tree()?;

        match email_tree.get(email.as_bytes())? {
            Some(user_id) => get_json(&self.users_tree()?, user_id),
            None => Ok(None),
        }
    }
}
