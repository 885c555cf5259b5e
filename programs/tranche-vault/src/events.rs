use anchor_lang::prelude::*;

#[event]
pub struct ProtocolInitialized {
    pub authority: Pubkey,
    pub stable_mint: Pubkey,
    pub lever_mint: Pubkey,
    pub supported_lst_mint: Pubkey,
    pub min_cr_bps: u64,
    pub target_cr_bps: u64,
}

#[event]
pub struct StableMinted {
    pub user: Pubkey,
    pub lst_in: u64,
    pub stable_to_user: u64,
    pub fee: u64,
    pub fee_bps: u64,
    pub cr_post: u64,
}

#[event]
pub struct StableRedeemed {
    pub user: Pubkey,
    pub stable_in: u64,
    pub lst_to_user: u64,
    pub fee: u64,
    pub fee_bps: u64,
    /// 10_000 on the par path, the applied ratio on the haircut path.
    pub haircut_bps: u64,
    pub cr_post: u64,
}

#[event]
pub struct LeverMinted {
    pub user: Pubkey,
    pub lst_in: u64,
    pub lever_to_user: u64,
    pub fee: u64,
    pub fee_bps: u64,
    pub nav: u64,
}

#[event]
pub struct LeverRedeemed {
    pub user: Pubkey,
    pub lever_in: u64,
    pub lst_to_user: u64,
    pub fee: u64,
    pub fee_bps: u64,
    pub nav: u64,
    pub cr_post: u64,
}

#[event]
pub struct ParametersUpdated {
    pub authority: Pubkey,
    pub min_cr_bps: u64,
    pub target_cr_bps: u64,
}

#[event]
pub struct PricesUpdated {
    pub source: Pubkey,
    pub sol_usd_price: u64,
    pub lst_sol_rate: u64,
    pub sol_usd_conf: u64,
    pub slot: u64,
}

#[event]
pub struct PauseToggled {
    pub authority: Pubkey,
    pub mint_paused: bool,
    pub redeem_paused: bool,
}

#[event]
pub struct ExchangeRateSynced {
    pub slot: u64,
    pub epoch: u64,
    pub lst_sol_rate: u64,
}
