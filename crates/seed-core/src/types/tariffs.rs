use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fee and limit amounts expressed in the base currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tariffs {
  #[serde(default)]
  pub deposit_fee: Decimal,
  #[serde(default)]
  pub min_deposit_amount: Decimal,
  #[serde(default)]
  pub min_collection_amount: Decimal,
  #[serde(default)]
  pub withdraw_fee: Decimal,
  #[serde(default)]
  pub min_withdraw_amount: Decimal,
  #[serde(default)]
  pub withdraw_limit_24h: Decimal,
  #[serde(default)]
  pub withdraw_limit_72h: Decimal,
}

impl Tariffs {
  pub fn has_negative(&self) -> bool {
    [
      self.deposit_fee,
      self.min_deposit_amount,
      self.min_collection_amount,
      self.withdraw_fee,
      self.min_withdraw_amount,
      self.withdraw_limit_24h,
      self.withdraw_limit_72h,
    ]
    .iter()
    .any(|v| v.is_sign_negative() && !v.is_zero())
  }
}
