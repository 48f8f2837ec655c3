use crate::entities::*;
use crate::errors::*;
use soroban_sdk::{contract, contractimpl, log, symbol_short, Address, Env, String};

const LEDGER_BUMP: u32 = 518_400;
const LEDGER_THRESHOLD: u32 = 259_200;

#[contract]
pub struct PropertyRegistry;

#[contractimpl]
impl PropertyRegistry {
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        admin.require_auth();
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        Ok(())
    }

    /// Register a property under its owner. Newly registered properties are
    /// unverified until the registry admin confirms the title.
    pub fn register_property(
        env: Env,
        owner: Address,
        property_id: String,
        property_address: String,
    ) -> Result<Property, Error> {
        owner.require_auth();
        let key = DataKey::Property(property_id.clone());
        if env.storage().persistent().has(&key) {
            return Err(Error::PropertyExists);
        }

        let property = Property {
            property_id: property_id.clone(),
            property_address,
            owner: owner.clone(),
            verified: false,
            registered_at: env.ledger().timestamp(),
            verified_at: 0,
        };
        Self::store(&env, &property);

        env.events()
            .publish((symbol_short!("prop_reg"), property_id), owner);
        Ok(property)
    }

    pub fn verify_property(env: Env, admin: Address, property_id: String) -> Result<(), Error> {
        Self::require_admin(&env, &admin)?;
        let mut property = Self::load(&env, &property_id)?;
        property.verified = true;
        property.verified_at = env.ledger().timestamp();
        Self::store(&env, &property);

        env.events()
            .publish((symbol_short!("prop_ver"), property_id), property.owner);
        Ok(())
    }

    pub fn revoke_verification(env: Env, admin: Address, property_id: String) -> Result<(), Error> {
        Self::require_admin(&env, &admin)?;
        let mut property = Self::load(&env, &property_id)?;
        property.verified = false;
        property.verified_at = 0;
        Self::store(&env, &property);

        env.events()
            .publish((symbol_short!("prop_rev"), property_id), property.owner);
        Ok(())
    }

    /// Hand the title to a new owner. Verification has to be redone.
    pub fn transfer_property(
        env: Env,
        owner: Address,
        property_id: String,
        new_owner: Address,
    ) -> Result<(), Error> {
        owner.require_auth();
        let mut property = Self::load(&env, &property_id)?;
        if property.owner != owner {
            return Err(Error::Unauthorized);
        }
        property.owner = new_owner.clone();
        property.verified = false;
        property.verified_at = 0;
        Self::store(&env, &property);

        env.events()
            .publish((symbol_short!("prop_xfer"), property_id), (owner, new_owner));
        Ok(())
    }

    pub fn is_property_verified(env: Env, property_id: String, owner: Address) -> bool {
        match Self::load(&env, &property_id) {
            Ok(property) => property.verified && property.owner == owner,
            Err(_) => {
                log!(&env, "Unknown property queried");
                false
            }
        }
    }

    pub fn get_property(env: Env, property_id: String) -> Result<Property, Error> {
        Self::load(&env, &property_id)
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        if *caller != admin {
            return Err(Error::Unauthorized);
        }
        caller.require_auth();
        Ok(())
    }

    fn load(env: &Env, property_id: &String) -> Result<Property, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Property(property_id.clone()))
            .ok_or(Error::PropertyNotFound)
    }

    fn store(env: &Env, property: &Property) {
        let key = DataKey::Property(property.property_id.clone());
        env.storage().persistent().set(&key, property);
        env.storage()
            .persistent()
            .extend_ttl(&key, LEDGER_THRESHOLD, LEDGER_BUMP);
    }
}
