use std::sync::Arc;

use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ids::parse_object_id;
use crate::domain::repositories::UserRepository;
use crate::domain::timeouts::{bounded, OperationTimeouts};
use crate::domain::user::{Address, AddressFields, AddressSlot, MAX_ADDRESSES};

/// Manages the two positional address slots of a user
#[derive(Clone)]
pub struct AddressBook {
    users: Arc<dyn UserRepository>,
    timeouts: OperationTimeouts,
}

impl AddressBook {
    pub fn new(users: Arc<dyn UserRepository>, timeouts: OperationTimeouts) -> Self {
        Self { users, timeouts }
    }

    /// Appends an address while the user has fewer than two
    ///
    /// The first address lands in the work slot, the second in the home slot.
    pub async fn add(&self, user_id: &str, fields: AddressFields) -> DomainResult<Address> {
        let user_id = parse_object_id(user_id, "user id")?;

        bounded(self.timeouts.long, "add_address", async {
            let count = self
                .users
                .count_addresses(user_id)
                .await?
                .ok_or(DomainError::UserNotFound)?;
            if count >= MAX_ADDRESSES {
                return Err(DomainError::InvalidArgument("Not Allowed".to_string()));
            }

            let address = Address::new(fields);
            // Zero matched after a successful count means a concurrent add
            // filled the list first.
            if self.users.push_address(user_id, &address).await? == 0 {
                return Err(DomainError::InvalidArgument("Not Allowed".to_string()));
            }

            info!(user = %user_id, address = %address.id, "added address");
            Ok(address)
        })
        .await
    }

    /// Overwrites the fields of the address held in `slot`
    pub async fn edit(&self, user_id: &str, slot: AddressSlot, fields: AddressFields) -> DomainResult<()> {
        let user_id = parse_object_id(user_id, "user id")?;

        bounded(self.timeouts.long, "edit_address", async {
            if self.users.set_address_slot(user_id, slot, &fields).await? == 0 {
                return Err(DomainError::NotFound(format!(
                    "no {} address to update",
                    slot.name()
                )));
            }

            info!(user = %user_id, slot = slot.name(), "updated address");
            Ok(())
        })
        .await
    }

    /// Removes every stored address
    pub async fn delete_all(&self, user_id: &str) -> DomainResult<()> {
        let user_id = parse_object_id(user_id, "user id")?;

        bounded(self.timeouts.long, "delete_addresses", async {
            if self.users.clear_addresses(user_id).await? == 0 {
                return Err(DomainError::UserNotFound);
            }
            info!(user = %user_id, "deleted addresses");
            Ok(())
        })
        .await
    }
}
