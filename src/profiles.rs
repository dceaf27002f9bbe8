//! Static descriptive copy for well-known assets

use serde::Serialize;

/// Narrative shown in the detail panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetProfile {
    pub description: &'static str,
    pub technology: &'static str,
    pub use_case: &'static str,
}

static BITCOIN: AssetProfile = AssetProfile {
    description: "The first and most valuable cryptocurrency, Bitcoin is digital gold and a store of value.",
    technology: "Proof of Work blockchain with SHA-256 hashing",
    use_case: "Digital store of value, peer-to-peer payments, hedge against inflation",
};

static ETHEREUM: AssetProfile = AssetProfile {
    description: "The world's programmable blockchain enabling smart contracts and decentralized applications.",
    technology: "Proof of Stake blockchain with Ethereum Virtual Machine (EVM)",
    use_case: "Smart contracts, DeFi, NFTs, dApps, programmable money",
};

static SOLANA: AssetProfile = AssetProfile {
    description: "High-performance blockchain supporting thousands of transactions per second.",
    technology: "Proof of History consensus with Proof of Stake",
    use_case: "Fast payments, DeFi, NFTs, Web3 applications",
};

static CARDANO: AssetProfile = AssetProfile {
    description: "A proof-of-stake blockchain platform focused on sustainability and peer-reviewed research.",
    technology: "Ouroboros Proof of Stake consensus mechanism",
    use_case: "Smart contracts, DeFi, identity management, supply chain",
};

static AVALANCHE: AssetProfile = AssetProfile {
    description: "A layer one blockchain that functions as a platform for decentralized applications and custom blockchain networks.",
    technology: "Avalanche consensus protocol with subnet architecture",
    use_case: "DeFi, enterprise applications, custom blockchains",
};

static CHAINLINK: AssetProfile = AssetProfile {
    description: "Decentralized oracle network connecting smart contracts to real-world data.",
    technology: "Oracle network with multiple data sources and aggregation",
    use_case: "Price feeds, external data, cross-chain interoperability",
};

static POLYGON: AssetProfile = AssetProfile {
    description: "Layer 2 scaling solution for Ethereum with fast and cheap transactions.",
    technology: "Plasma and PoS based sidechain solution",
    use_case: "Ethereum scaling, DeFi, gaming, NFT marketplaces",
};

static POLKADOT: AssetProfile = AssetProfile {
    description: "A multi-chain blockchain platform that enables different blockchains to transfer messages and value.",
    technology: "Nominated Proof of Stake with parachain architecture",
    use_case: "Cross-chain interoperability, custom blockchains, DeFi",
};

/// Used for any identifier without dedicated copy
pub static GENERIC_PROFILE: AssetProfile = AssetProfile {
    description: "A cryptocurrency with innovative blockchain technology and diverse use cases.",
    technology: "Advanced blockchain consensus mechanism",
    use_case: "Various blockchain applications and financial services",
};

/// Looks up the profile for a CoinGecko identifier
pub fn profile_for(id: &str) -> &'static AssetProfile {
    match id {
        "bitcoin" => &BITCOIN,
        "ethereum" => &ETHEREUM,
        "solana" => &SOLANA,
        "cardano" => &CARDANO,
        // CoinGecko lists Avalanche as `avalanche-2`
        "avalanche" | "avalanche-2" => &AVALANCHE,
        "chainlink" => &CHAINLINK,
        "polygon" | "matic-network" => &POLYGON,
        "polkadot" => &POLKADOT,
        _ => &GENERIC_PROFILE,
    }
}
