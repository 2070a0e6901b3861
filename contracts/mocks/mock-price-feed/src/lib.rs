#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};

#[contracttype]
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Asset {
    Stellar(Address),
    Other(Symbol),
}

#[contracttype]
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct PriceData {
    pub price: i128,
    pub timestamp: u64,
}

#[contracttype]
enum DataKey {
    Admin,
    Decimals,
    Resolution,
    LastTimestamp,
    Price(Asset),
}

fn require_admin(env: &Env) {
    let admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("not initialized");
    admin.require_auth();
}

/// Fixed price feed exposing the Reflector read surface. Prices are set by
/// the admin and stamped with the ledger time of the update.
#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    pub fn initialize(env: Env, admin: Address, decimals: u32, resolution: u32) {
        if env.storage().instance().has(&DataKey::Admin) {
            panic!("already initialized");
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Decimals, &decimals);
        env.storage().instance().set(&DataKey::Resolution, &resolution);
    }

    pub fn set_price(env: Env, asset: Asset, price: i128) {
        require_admin(&env);
        let timestamp = env.ledger().timestamp();
        env.storage().persistent().set(
            &DataKey::Price(asset),
            &PriceData { price, timestamp },
        );
        env.storage()
            .instance()
            .set(&DataKey::LastTimestamp, &timestamp);
    }

    pub fn clear_price(env: Env, asset: Asset) {
        require_admin(&env);
        env.storage().persistent().remove(&DataKey::Price(asset));
    }

    pub fn decimals(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::Decimals)
            .unwrap_or(14u32)
    }

    pub fn resolution(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::Resolution)
            .unwrap_or(300u32)
    }

    pub fn lastprice(env: Env, asset: Asset) -> Option<PriceData> {
        env.storage().persistent().get(&DataKey::Price(asset))
    }

    pub fn last_timestamp(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::LastTimestamp)
            .unwrap_or(0u64)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::testutils::{Address as _, Ledger};

    fn setup(env: &Env) -> (MockPriceFeedClient<'_>, Address) {
        env.mock_all_auths();
        let admin = Address::generate(env);
        let id = env.register(MockPriceFeed, ());
        let client = MockPriceFeedClient::new(env, &id);
        client.initialize(&admin, &8u32, &300u32);
        (client, admin)
    }

    #[test]
    fn price_is_stamped_with_update_time() {
        let env = Env::default();
        env.ledger().with_mut(|li| li.timestamp = 1_000);
        let (client, _) = setup(&env);
        let token = Address::generate(&env);
        let asset = Asset::Stellar(token);

        assert_eq!(client.lastprice(&asset), None);
        client.set_price(&asset, &265_000_000_000i128);

        env.ledger().with_mut(|li| li.timestamp = 1_900);
        let quote = client.lastprice(&asset).unwrap();
        assert_eq!(quote.price, 265_000_000_000);
        assert_eq!(quote.timestamp, 1_000);
        assert_eq!(client.last_timestamp(), 1_000);
        assert_eq!(client.decimals(), 8);
        assert_eq!(client.resolution(), 300);
    }

    #[test]
    fn symbol_and_address_keys_are_distinct() {
        let env = Env::default();
        let (client, _) = setup(&env);
        let eth = Asset::Other(Symbol::new(&env, "ETH"));
        client.set_price(&eth, &1i128);
        assert!(client.lastprice(&eth).is_some());
        assert_eq!(client.lastprice(&Asset::Stellar(Address::generate(&env))), None);

        client.clear_price(&eth);
        assert_eq!(client.lastprice(&eth), None);
    }

    #[test]
    #[should_panic(expected = "already initialized")]
    fn second_initialize_panics() {
        let env = Env::default();
        let (client, admin) = setup(&env);
        client.initialize(&admin, &8u32, &300u32);
    }
}
