/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! Turns enriched coins into seed entries.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use seed_core::types::{
  BaseFactor, CurrencyOptions, CurrencyRecord, RateLimitedEntry, SeedEntry, Tariffs,
};
use seed_core::{DEFAULT_GAS_AMOUNT, DEFAULT_GAS_PRICE, MANUAL_REVIEW_MARKER};
use tracing::{info, warn};

use crate::error::SkipReason;
use crate::types::{AssemblyContext, ConvertedTariffs, EnrichedCoin};

const CURRENCY_TYPE: &str = "coin";

/// Display precision derived from the price.
///
/// `x = log10(price * 100)`, then `0` when `x <= 0`, otherwise `ceil(x) + 1`.
/// Non-positive prices yield `0`.
pub fn precision(price: Decimal) -> u32 {
  if price <= Decimal::ZERO {
    return 0;
  }

  let Some(scaled) = price.checked_mul(Decimal::ONE_HUNDRED).and_then(|p| p.to_f64()) else {
    return 0;
  };

  let x = scaled.log10();
  if !x.is_finite() || x <= 0.0 {
    0
  } else {
    x.ceil() as u32 + 1
  }
}

/// Express each tariff in units of the coin. `None` when a division fails.
pub fn convert_tariffs(tariffs: &Tariffs, price: Decimal) -> Option<ConvertedTariffs> {
  let per_unit = |amount: Decimal| amount.checked_div(price).map(|v| v.normalize());

  Some(ConvertedTariffs {
    deposit_fee: per_unit(tariffs.deposit_fee)?,
    min_deposit_amount: per_unit(tariffs.min_deposit_amount)?,
    min_collection_amount: per_unit(tariffs.min_collection_amount)?,
    withdraw_fee: per_unit(tariffs.withdraw_fee)?,
    min_withdraw_amount: per_unit(tariffs.min_withdraw_amount)?,
    withdraw_limit_24h: per_unit(tariffs.withdraw_limit_24h)?,
    withdraw_limit_72h: per_unit(tariffs.withdraw_limit_72h)?,
  })
}

/// Build the seed entry for `coin` at `position`.
///
/// Rate-limited coins become the two-field placeholder and ignore `position`.
pub fn assemble(
  coin: &EnrichedCoin,
  position: u32,
  ctx: &AssemblyContext,
) -> Result<SeedEntry, SkipReason> {
  let (detail, token, on_chain) = match coin {
    EnrichedCoin::RateLimited { code } => {
      return Ok(SeedEntry::RateLimited(RateLimitedEntry::new(code.clone())));
    }
    EnrichedCoin::Standard(detail) => (detail, None, false),
    EnrichedCoin::OnChain { detail, token } => (detail, *token, true),
  };

  let Some(price) = detail.price_in(&ctx.base_currency) else {
    warn!("Skipping {}: no {} price", detail.id, ctx.base_currency);
    return Err(SkipReason::InvalidPrice(format!("no {} price", ctx.base_currency)));
  };

  if price <= Decimal::ZERO {
    warn!(
      "Skipping {}: price anomaly {} {} (precision {})",
      detail.id,
      price,
      ctx.base_currency,
      precision(price)
    );
    return Err(SkipReason::InvalidPrice(format!("non-positive price {}", price)));
  }

  let Some(fees) = convert_tariffs(&ctx.tariffs, price) else {
    warn!("Skipping {}: tariff conversion overflowed at price {}", detail.id, price);
    return Err(SkipReason::InvalidPrice(format!("tariff conversion overflow at {}", price)));
  };

  let mapped_key = detail
    .asset_platform_id
    .as_ref()
    .and_then(|platform| ctx.blockchain_mapping.get(platform))
    .cloned();

  let base_factor = match token {
    Some(info) => {
      let factor = BaseFactor::from_decimals(info.token_decimal);
      if factor.needs_review() {
        warn!(
          "{} reports {} decimals, base_factor left as {}",
          detail.id, info.token_decimal, MANUAL_REVIEW_MARKER
        );
      }
      factor
    }
    None => BaseFactor::NeedsReview,
  };

  if !on_chain || mapped_key.is_none() || base_factor.needs_review() {
    info!("For {} you need to check config and replace '{}' fields", detail.id, MANUAL_REVIEW_MARKER);
  }

  let options = CurrencyOptions {
    gas_amount: on_chain.then_some(DEFAULT_GAS_AMOUNT),
    gas_price: on_chain.then_some(DEFAULT_GAS_PRICE),
    erc20_contract_address: if on_chain { detail.contract_address.clone() } else { None },
    coingecko_id: detail.id.clone(),
    base_currency: ctx.base_currency.clone(),
    price,
  };

  Ok(SeedEntry::Currency(CurrencyRecord {
    id: detail.symbol.clone(),
    name: detail.name.clone(),
    blockchain_key: mapped_key.unwrap_or_else(|| MANUAL_REVIEW_MARKER.to_string()),
    symbol: MANUAL_REVIEW_MARKER.to_string(),
    currency_type: CURRENCY_TYPE.to_string(),
    deposit_fee: fees.deposit_fee,
    min_deposit_amount: fees.min_deposit_amount,
    min_collection_amount: fees.min_collection_amount,
    withdraw_fee: fees.withdraw_fee,
    min_withdraw_amount: fees.min_withdraw_amount,
    withdraw_limit_24h: fees.withdraw_limit_24h,
    withdraw_limit_72h: fees.withdraw_limit_72h,
    position,
    visible: true,
    deposit_enabled: true,
    withdrawal_enabled: true,
    icon_url: detail.icon_url.clone(),
    precision: precision(price),
    base_factor,
    options,
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;
  use seed_core::types::{CoinDetail, ExplorerTokenInfo};
  use std::collections::HashMap;

  fn context() -> AssemblyContext {
    AssemblyContext {
      base_currency: "usd".to_string(),
      tariffs: Tariffs {
        deposit_fee: dec!(0),
        min_deposit_amount: dec!(10),
        min_collection_amount: dec!(20),
        withdraw_fee: dec!(2),
        min_withdraw_amount: dec!(10),
        withdraw_limit_24h: dec!(1000),
        withdraw_limit_72h: dec!(3000),
      },
      blockchain_mapping: HashMap::from([("ethereum".to_string(), "eth-mainnet".to_string())]),
    }
  }

  fn detail(platform: Option<&str>, price: Option<Decimal>) -> CoinDetail {
    CoinDetail {
      id: "tether".to_string(),
      symbol: "usdt".to_string(),
      name: "Tether".to_string(),
      asset_platform_id: platform.map(str::to_string),
      contract_address: platform.map(|_| "0xdac17f958d2ee523a2206206994597c13d831ec7".to_string()),
      icon_url: Some("https://assets.example/usdt.png".to_string()),
      price_by_currency: price.map(|p| HashMap::from([("usd".to_string(), p)])).unwrap_or_default(),
    }
  }

  fn currency(entry: SeedEntry) -> CurrencyRecord {
    match entry {
      SeedEntry::Currency(record) => record,
      other => panic!("Expected currency, got {:?}", other),
    }
  }

  #[test]
  fn test_precision() {
    assert_eq!(precision(dec!(0.005)), 0);
    assert_eq!(precision(dec!(150)), 6);
    assert_eq!(precision(dec!(1.23)), 4);
    assert_eq!(precision(dec!(1)), 3);
    assert_eq!(precision(dec!(0)), 0);
    assert_eq!(precision(dec!(-4)), 0);
  }

  #[test]
  fn test_convert_tariffs() {
    let fees = convert_tariffs(&context().tariffs, dec!(2)).unwrap();
    assert_eq!(fees.deposit_fee, dec!(0));
    assert_eq!(fees.min_deposit_amount, dec!(5));
    assert_eq!(fees.withdraw_fee, dec!(1));
    assert_eq!(fees.withdraw_limit_72h, dec!(1500));
  }

  #[test]
  fn test_convert_tariffs_overflow() {
    let tariffs = Tariffs { withdraw_limit_72h: Decimal::MAX, ..Tariffs::default() };
    assert!(convert_tariffs(&tariffs, dec!(0.0000001)).is_none());
  }

  #[test]
  fn test_assemble_on_chain() {
    let coin = EnrichedCoin::OnChain {
      detail: detail(Some("ethereum"), Some(dec!(0.5))),
      token: Some(ExplorerTokenInfo { token_decimal: 6 }),
    };

    let record = currency(assemble(&coin, 4, &context()).unwrap());
    assert_eq!(record.id, "usdt");
    assert_eq!(record.name, "Tether");
    assert_eq!(record.blockchain_key, "eth-mainnet");
    assert_eq!(record.symbol, "CHANGEME");
    assert_eq!(record.currency_type, "coin");
    assert_eq!(record.position, 4);
    assert_eq!(record.withdraw_fee, dec!(4));
    assert_eq!(record.min_collection_amount, dec!(40));
    assert_eq!(record.precision, 3);
    assert_eq!(record.base_factor, BaseFactor::Known(1_000_000));
    assert!(record.visible && record.deposit_enabled && record.withdrawal_enabled);
    assert_eq!(record.options.gas_amount, Some(21_000));
    assert_eq!(record.options.gas_price, Some(1_000_000_000));
    assert_eq!(
      record.options.erc20_contract_address.as_deref(),
      Some("0xdac17f958d2ee523a2206206994597c13d831ec7")
    );
    assert_eq!(record.options.coingecko_id, "tether");
    assert_eq!(record.options.price, dec!(0.5));
  }

  #[test]
  fn test_assemble_on_chain_unresolved_decimals() {
    let coin = EnrichedCoin::OnChain { detail: detail(Some("ethereum"), Some(dec!(1))), token: None };
    let record = currency(assemble(&coin, 1, &context()).unwrap());
    assert_eq!(record.base_factor, BaseFactor::NeedsReview);
    assert!(record.options.erc20_contract_address.is_some());
  }

  #[test]
  fn test_assemble_standard_has_no_gas_options() {
    let coin = EnrichedCoin::Standard(detail(Some("binance-smart-chain"), Some(dec!(300))));
    let record = currency(assemble(&coin, 2, &context()).unwrap());

    assert_eq!(record.blockchain_key, "CHANGEME");
    assert_eq!(record.base_factor, BaseFactor::NeedsReview);
    assert_eq!(record.options.gas_amount, None);
    assert_eq!(record.options.gas_price, None);
    assert_eq!(record.options.erc20_contract_address, None);
    assert_eq!(record.precision, 6);
  }

  #[test]
  fn test_assemble_wide_decimals_need_review() {
    let coin = EnrichedCoin::OnChain {
      detail: detail(Some("ethereum"), Some(dec!(1))),
      token: Some(ExplorerTokenInfo { token_decimal: 24 }),
    };
    let record = currency(assemble(&coin, 1, &context()).unwrap());
    assert_eq!(record.base_factor, BaseFactor::NeedsReview);
  }

  #[test]
  fn test_assemble_rate_limited() {
    let coin = EnrichedCoin::RateLimited { code: "usdt".to_string() };
    let entry = assemble(&coin, 9, &context()).unwrap();
    assert_eq!(entry, SeedEntry::RateLimited(RateLimitedEntry::new("usdt")));
    assert_eq!(entry.position(), None);
  }

  #[test]
  fn test_assemble_invalid_prices() {
    let missing = EnrichedCoin::Standard(detail(None, None));
    assert!(matches!(assemble(&missing, 1, &context()), Err(SkipReason::InvalidPrice(_))));

    let zero = EnrichedCoin::Standard(detail(None, Some(dec!(0))));
    assert!(matches!(assemble(&zero, 1, &context()), Err(SkipReason::InvalidPrice(_))));

    let negative = EnrichedCoin::Standard(detail(None, Some(dec!(-1))));
    assert!(matches!(assemble(&negative, 1, &context()), Err(SkipReason::InvalidPrice(_))));
  }
}
