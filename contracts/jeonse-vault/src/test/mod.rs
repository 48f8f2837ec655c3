
use compliance_gate::{ComplianceGate, ComplianceGateClient, ComplianceLevel};
use property_registry::{PropertyRegistry, PropertyRegistryClient};
use soroban_sdk::{
    testutils::{Address as _, Events, Ledger},
    token::{StellarAssetClient, TokenClient},
    Address, Env, String, Symbol, TryFromVal, Val, Vec,
};

use crate::{JeonseVault, JeonseVaultClient, VaultConfig};

pub const NOW: u64 = 1_700_000_000;
pub const YEAR: u64 = 365 * 86_400;
pub const LEASE_END: u64 = NOW + 2 * YEAR;

/// 1,000,000,000 units: a 30% pool share gives 300,000,000 of capacity.
pub const DEPOSIT_AMOUNT: u128 = 1_000_000_000;
pub const POOL_CAPACITY: u128 = 300_000_000;
pub const RELEASE_FEE: u128 = 1_000_000;

pub struct Fixture {
    pub env: Env,
    pub vault: JeonseVaultClient<'static>,
    pub token: TokenClient<'static>,
    pub token_admin: StellarAssetClient<'static>,
    pub gate: ComplianceGateClient<'static>,
    pub registry: PropertyRegistryClient<'static>,
    pub admin: Address,
    pub tenant: Address,
    pub landlord: Address,
    pub property_id: String,
}

/// Vault wired to a Stellar asset, a compliance gate and a property
/// registry. Tenant and landlord are KYC'd, the landlord's property is
/// verified and the tenant holds enough to pay several deposits.
pub fn setup() -> Fixture {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(NOW);

    let admin = Address::generate(&env);

    let token_contract = env.register_stellar_asset_contract_v2(admin.clone());
    let token_address = token_contract.address();
    let token = TokenClient::new(&env, &token_address);
    let token_admin = StellarAssetClient::new(&env, &token_address);

    let gate = ComplianceGateClient::new(&env, &env.register(ComplianceGate, ()));
    gate.initialize(&admin);
    let registry = PropertyRegistryClient::new(&env, &env.register(PropertyRegistry, ()));
    registry.initialize(&admin);

    let vault_id = env.register(JeonseVault, ());
    let vault = JeonseVaultClient::new(&env, &vault_id);
    vault.initialize(
        &admin,
        &token_address,
        &gate.address,
        &registry.address,
        &VaultConfig::standard(),
    );
    gate.add_operator(&admin, &vault_id);

    let tenant = Address::generate(&env);
    let landlord = Address::generate(&env);
    gate.set_compliance(&admin, &tenant, &ComplianceLevel::Corporate);
    gate.set_compliance(&admin, &landlord, &ComplianceLevel::Corporate);

    let property_id = String::from_str(&env, "SEOUL-MAPO-0042");
    registry.register_property(
        &landlord,
        &property_id,
        &String::from_str(&env, "45 World Cup-ro, Mapo-gu, Seoul"),
    );
    registry.verify_property(&admin, &property_id);

    token_admin.mint(&tenant, &(DEPOSIT_AMOUNT as i128 * 10));
    token_admin.mint(&admin, &(DEPOSIT_AMOUNT as i128));

    Fixture {
        env,
        vault,
        token,
        token_admin,
        gate,
        registry,
        admin,
        tenant,
        landlord,
        property_id,
    }
}

impl Fixture {
    pub fn create_deposit(&self, amount: u128, enable_investment: bool) -> u64 {
        self.vault.create_deposit(
            &self.tenant,
            &self.landlord,
            &amount,
            &NOW,
            &LEASE_END,
            &self.property_id,
            &String::from_str(&self.env, "45 World Cup-ro, Mapo-gu, Seoul"),
            &enable_investment,
        )
    }

    /// A KYC'd investor funded with `funds`.
    pub fn investor(&self, level: ComplianceLevel, funds: u128) -> Address {
        let investor = Address::generate(&self.env);
        self.gate.set_compliance(&self.admin, &investor, &level);
        self.token_admin.mint(&investor, &(funds as i128));
        investor
    }

    pub fn balance(&self, account: &Address) -> i128 {
        self.token.balance(account)
    }

    pub fn vault_balance(&self) -> i128 {
        self.token.balance(&self.vault.address)
    }

    /// Topics and data of the vault's events named `name`, oldest first.
    pub fn vault_events(&self, name: Symbol) -> Vec<(Vec<Val>, Val)> {
        let mut found = Vec::new(&self.env);
        for (contract, topics, data) in self.env.events().all().iter() {
            if contract != self.vault.address {
                continue;
            }
            let head = topics
                .get(0)
                .and_then(|topic| Symbol::try_from_val(&self.env, &topic).ok());
            if head == Some(name.clone()) {
                found.push_back((topics, data));
            }
        }
        found
    }

    /// Deposit id carried as the second topic.
    pub fn topic_id(&self, topics: &Vec<Val>) -> u64 {
        u64::try_from_val(&self.env, &topics.get(1).unwrap()).unwrap()
    }

    pub fn end_lease(&self) {
        self.env.ledger().set_timestamp(LEASE_END);
    }
}
