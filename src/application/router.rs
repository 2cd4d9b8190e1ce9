//! Per-router calldata profiles.
//!
//! Each router family exposes a different method and parameter layout per
//! leg kind. [`RouterProfile`] is selected from configuration and turns a
//! [`SwapRequest`] into a ready-to-sign [`TxRequest`].

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol_data, SolCall, SolType};

use super::contracts::{ICrocSwapDex, IMonadSwap, IUniswapV2Router};
use crate::domain::error::DomainError;
use crate::domain::{parse_units, Leg, SwapRequest, TxRequest};
use crate::error::{ConfigError, Result, SwapError};
use crate::infrastructure::config::router::{RouterConfig, RouterKind};

/// Parameter layout of the legacy `swapExactETHForTokens` call.
///
/// The router reads the path through the explicit `0xa0` offset word; the
/// trailing head word is ignored by the contract.
type NativeInParams = (
    sol_data::Uint<256>,
    sol_data::Uint<256>,
    sol_data::Address,
    sol_data::Uint<256>,
    sol_data::Array<sol_data::Address>,
);

/// Inner command of Ambient's swap callpath.
type AmbientSwapCmd = (
    sol_data::Uint<256>,
    sol_data::Address,
    sol_data::Uint<24>,
    sol_data::Bool,
    sol_data::Bool,
    sol_data::Uint<128>,
    sol_data::Uint<16>,
    sol_data::Uint<128>,
    sol_data::Uint<128>,
    sol_data::Uint<8>,
);

/// Offset word the legacy native-in layout carries.
const NATIVE_IN_PATH_OFFSET: u64 = 0xa0;

/// Ambient callpath for the swap command.
const AMBIENT_SWAP_CALLPATH: u16 = 1;

/// Calldata layout of a router family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEncoding {
    /// Uniswap-V2 methods; `native_path` stands in for the native leg of a path.
    UniswapV2 { native_path: Address },
    /// V2-style native legs with a zero-address path, `userCmd` for token pairs.
    Ambient { pool_idx: u32, limit_price: u128 },
    /// `swap(fromToken, toToken, amountIn)`, token pairs only.
    MonadSwap,
}

/// A configured router: contract address, encoding, gas and deadline window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterProfile {
    kind: RouterKind,
    address: Address,
    deadline_secs: u64,
    gas: [u64; 3],
    encoding: RouteEncoding,
}

impl RouterProfile {
    /// Build the profile selected by `[router]`.
    ///
    /// # Errors
    ///
    /// Fails when a Bean router has no wrapped native token or Ambient
    /// parameters do not fit their ABI types.
    pub fn from_config(config: &RouterConfig) -> std::result::Result<Self, ConfigError> {
        let encoding = match config.kind {
            RouterKind::Bean => RouteEncoding::UniswapV2 {
                native_path: config.wrapped_native.ok_or(ConfigError::MissingField {
                    field: "router.wrapped_native",
                })?,
            },
            RouterKind::Ambient => {
                if config.ambient.pool_idx >= 1 << 24 {
                    return Err(ConfigError::InvalidValue {
                        field: "router.ambient.pool_idx",
                        reason: "must fit in uint24".to_string(),
                    });
                }
                let scaled = parse_units(config.ambient.limit_price, 18).map_err(|e| {
                    ConfigError::InvalidValue {
                        field: "router.ambient.limit_price",
                        reason: e.to_string(),
                    }
                })?;
                let limit_price =
                    u128::try_from(scaled).map_err(|_| ConfigError::InvalidValue {
                        field: "router.ambient.limit_price",
                        reason: "must fit in uint128 once scaled by 1e18".to_string(),
                    })?;
                RouteEncoding::Ambient {
                    pool_idx: config.ambient.pool_idx,
                    limit_price,
                }
            }
            RouterKind::MonadSwap => RouteEncoding::MonadSwap,
        };

        Ok(Self {
            kind: config.kind,
            address: config.address,
            deadline_secs: config.deadline_secs,
            gas: Leg::ALL.map(|leg| config.gas_limit(leg)),
            encoding,
        })
    }

    #[must_use]
    pub const fn kind(&self) -> RouterKind {
        self.kind
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Router contract address, also the approval spender.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub const fn encoding(&self) -> &RouteEncoding {
        &self.encoding
    }

    /// Whether the router has a method for `leg`.
    #[must_use]
    pub fn supports(&self, leg: Leg) -> bool {
        self.selector(leg).is_some()
    }

    /// 4-byte selector used for `leg`.
    #[must_use]
    pub fn selector(&self, leg: Leg) -> Option<[u8; 4]> {
        let selector = match (&self.encoding, leg) {
            (RouteEncoding::MonadSwap, Leg::TokenToToken) => IMonadSwap::swapCall::SELECTOR,
            (RouteEncoding::MonadSwap, _) => return None,
            (_, Leg::NativeToToken) => IUniswapV2Router::swapExactETHForTokensCall::SELECTOR,
            (_, Leg::TokenToNative) => IUniswapV2Router::swapExactTokensForETHCall::SELECTOR,
            (RouteEncoding::UniswapV2 { .. }, Leg::TokenToToken) => {
                IUniswapV2Router::swapExactTokensForTokensCall::SELECTOR
            }
            (RouteEncoding::Ambient { .. }, Leg::TokenToToken) => {
                ICrocSwapDex::userCmdCall::SELECTOR
            }
        };
        Some(selector)
    }

    /// Gas ceiling for `leg`.
    #[must_use]
    pub fn gas_limit(&self, leg: Leg) -> u64 {
        match leg {
            Leg::NativeToToken => self.gas[0],
            Leg::TokenToNative => self.gas[1],
            Leg::TokenToToken => self.gas[2],
        }
    }

    /// Deadline for a swap submitted at `now` (unix seconds).
    #[must_use]
    pub fn deadline(&self, now: u64) -> U256 {
        U256::from(now.saturating_add(self.deadline_secs))
    }

    /// Encode `request` as a transaction paying out to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::UnsupportedRoute`] when the router has no method
    /// for the request's leg, and [`DomainError::AmountOutOfRange`] when the
    /// amount does not fit Ambient's `uint128` quantity.
    pub fn encode(
        &self,
        request: &SwapRequest,
        recipient: Address,
        deadline: U256,
    ) -> Result<TxRequest> {
        let leg = request.leg();
        let amount_in = request.amount_in();
        let from = request.from().address();
        let to = request.to().address();

        let (data, value): (Vec<u8>, U256) = match (&self.encoding, leg) {
            (RouteEncoding::MonadSwap, Leg::TokenToToken) => {
                let call = IMonadSwap::swapCall {
                    fromToken: from,
                    toToken: to,
                    amountIn: amount_in,
                };
                (call.abi_encode(), U256::ZERO)
            }
            (RouteEncoding::MonadSwap, _) => {
                return Err(self.unsupported(request).into());
            }
            (encoding, Leg::NativeToToken) => {
                let path = vec![native_path(encoding), to];
                let params = NativeInParams::abi_encode_params(&(
                    U256::ZERO,
                    U256::from(NATIVE_IN_PATH_OFFSET),
                    recipient,
                    deadline,
                    path,
                ));
                let selector = IUniswapV2Router::swapExactETHForTokensCall::SELECTOR;
                ([selector.as_slice(), params.as_slice()].concat(), amount_in)
            }
            (encoding, Leg::TokenToNative) => {
                let call = IUniswapV2Router::swapExactTokensForETHCall {
                    amountIn: amount_in,
                    amountOutMin: U256::ZERO,
                    path: vec![from, native_path(encoding)],
                    to: recipient,
                    deadline,
                };
                (call.abi_encode(), U256::ZERO)
            }
            (RouteEncoding::UniswapV2 { .. }, Leg::TokenToToken) => {
                let call = IUniswapV2Router::swapExactTokensForTokensCall {
                    amountIn: amount_in,
                    amountOutMin: U256::ZERO,
                    path: vec![from, to],
                    to: recipient,
                    deadline,
                };
                (call.abi_encode(), U256::ZERO)
            }
            (
                RouteEncoding::Ambient {
                    pool_idx,
                    limit_price,
                },
                Leg::TokenToToken,
            ) => {
                let qty = u128::try_from(amount_in).map_err(|_| DomainError::AmountOutOfRange {
                    amount: request.from().format_units(amount_in),
                    decimals: request.from().decimals(),
                })?;
                let cmd = AmbientSwapCmd::abi_encode_params(&(
                    U256::ZERO,
                    from,
                    alloy_primitives::aliases::U24::from(*pool_idx),
                    true,
                    true,
                    qty,
                    0u16,
                    *limit_price,
                    0u128,
                    0u8,
                ));
                let call = ICrocSwapDex::userCmdCall {
                    callpath: AMBIENT_SWAP_CALLPATH,
                    cmd: Bytes::from(cmd),
                };
                (call.abi_encode(), U256::ZERO)
            }
        };

        Ok(TxRequest {
            to: self.address,
            data: Bytes::from(data),
            value,
            gas_limit: self.gas_limit(leg),
        })
    }

    fn unsupported(&self, request: &SwapRequest) -> SwapError {
        SwapError::UnsupportedRoute {
            router: self.name(),
            from: request.from().symbol().to_string(),
            to: request.to().symbol().to_string(),
        }
    }
}

fn native_path(encoding: &RouteEncoding) -> Address {
    match encoding {
        RouteEncoding::UniswapV2 { native_path } => *native_path,
        RouteEncoding::Ambient { .. } | RouteEncoding::MonadSwap => Address::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TokenDescriptor;
    use crate::error::Error;

    const DEADLINE: u64 = 1_700_001_200;

    fn wmon() -> Address {
        Address::repeat_byte(0x76)
    }

    fn recipient() -> Address {
        Address::repeat_byte(0xee)
    }

    fn mon() -> TokenDescriptor {
        TokenDescriptor::native("MON", 18)
    }

    fn usdc() -> TokenDescriptor {
        TokenDescriptor::new("USDC", Address::repeat_byte(0x11), 6)
    }

    fn weth() -> TokenDescriptor {
        TokenDescriptor::new("WETH", Address::repeat_byte(0x22), 18)
    }

    fn profile(kind: RouterKind) -> RouterProfile {
        let mut config = RouterConfig {
            kind,
            address: Address::repeat_byte(0xca),
            ..RouterConfig::default()
        };
        config.wrapped_native = Some(wmon());
        RouterProfile::from_config(&config).unwrap()
    }

    fn word(data: &[u8], index: usize) -> &[u8] {
        let start = 4 + index * 32;
        &data[start..start + 32]
    }

    fn address_word(address: Address) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[12..].copy_from_slice(address.as_slice());
        out
    }

    fn request(from: TokenDescriptor, to: TokenDescriptor, amount: u64) -> SwapRequest {
        SwapRequest::new(from, to, U256::from(amount)).unwrap()
    }

    #[test]
    fn token_to_native_places_amount_in_first_word() {
        let bean = profile(RouterKind::Bean);
        let swap = request(usdc(), mon(), 100_000_000);

        let tx = bean.encode(&swap, recipient(), U256::from(DEADLINE)).unwrap();

        assert_eq!(&tx.data[..4], &[0x18, 0xcb, 0xaf, 0xe5]);
        assert_eq!(word(&tx.data, 0), &U256::from(100_000_000u64).to_be_bytes::<32>());
        assert_eq!(tx.value, U256::ZERO);
        assert_eq!(tx.gas_limit, 350_000);
        assert_eq!(tx.to, Address::repeat_byte(0xca));

        let decoded =
            IUniswapV2Router::swapExactTokensForETHCall::abi_decode(&tx.data).unwrap();
        assert_eq!(decoded.path, vec![usdc().address(), wmon()]);
        assert_eq!(decoded.to, recipient());
        assert_eq!(decoded.deadline, U256::from(DEADLINE));
    }

    #[test]
    fn native_to_token_uses_legacy_layout() {
        let bean = profile(RouterKind::Bean);
        let swap = request(mon(), usdc(), 5_000_000_000_000_000);

        let tx = bean.encode(&swap, recipient(), U256::from(DEADLINE)).unwrap();

        assert_eq!(&tx.data[..4], &[0x7f, 0xf3, 0x6a, 0xb5]);
        assert_eq!(word(&tx.data, 0), &[0u8; 32]);
        assert_eq!(word(&tx.data, 1), &U256::from(0xa0u64).to_be_bytes::<32>());
        assert_eq!(word(&tx.data, 2), &address_word(recipient()));
        assert_eq!(word(&tx.data, 3), &U256::from(DEADLINE).to_be_bytes::<32>());
        // path length, then the two hops
        assert_eq!(word(&tx.data, 5), &U256::from(2u64).to_be_bytes::<32>());
        assert_eq!(word(&tx.data, 6), &address_word(wmon()));
        assert_eq!(word(&tx.data, 7), &address_word(usdc().address()));
        assert_eq!(tx.value, U256::from(5_000_000_000_000_000u64));
        assert_eq!(tx.gas_limit, 250_000);
    }

    #[test]
    fn ambient_native_legs_use_zero_address_path() {
        let ambient = profile(RouterKind::Ambient);
        let tx = ambient
            .encode(&request(usdc(), mon(), 1_000), recipient(), U256::from(DEADLINE))
            .unwrap();

        let decoded =
            IUniswapV2Router::swapExactTokensForETHCall::abi_decode(&tx.data).unwrap();
        assert_eq!(decoded.path, vec![usdc().address(), Address::ZERO]);

        let tx = ambient
            .encode(&request(mon(), usdc(), 1_000), recipient(), U256::from(DEADLINE))
            .unwrap();
        assert_eq!(word(&tx.data, 6), &[0u8; 32]);
    }

    #[test]
    fn bean_token_to_token_routes_directly() {
        let bean = profile(RouterKind::Bean);
        let tx = bean
            .encode(&request(usdc(), weth(), 42), recipient(), U256::from(DEADLINE))
            .unwrap();

        assert_eq!(&tx.data[..4], &[0x38, 0xed, 0x17, 0x39]);
        let decoded =
            IUniswapV2Router::swapExactTokensForTokensCall::abi_decode(&tx.data).unwrap();
        assert_eq!(decoded.amountIn, U256::from(42u64));
        assert_eq!(decoded.path, vec![usdc().address(), weth().address()]);
        assert_eq!(tx.gas_limit, 350_000);
    }

    #[test]
    fn ambient_token_to_token_wraps_swap_command() {
        let ambient = profile(RouterKind::Ambient);
        let tx = ambient
            .encode(&request(usdc(), weth(), 2_500_000), recipient(), U256::from(DEADLINE))
            .unwrap();

        assert_eq!(&tx.data[..4], &[0xa1, 0x51, 0x12, 0xf9]);
        assert_eq!(tx.gas_limit, 500_000);

        let decoded = ICrocSwapDex::userCmdCall::abi_decode(&tx.data).unwrap();
        assert_eq!(decoded.callpath, 1);

        let cmd = &decoded.cmd;
        assert_eq!(cmd.len(), 10 * 32);
        let cmd_word = |i: usize| &cmd[i * 32..(i + 1) * 32];
        assert_eq!(cmd_word(1), &address_word(usdc().address()));
        assert_eq!(cmd_word(2), &U256::from(36_000u64).to_be_bytes::<32>());
        assert_eq!(cmd_word(3), &U256::from(1u64).to_be_bytes::<32>());
        assert_eq!(cmd_word(4), &U256::from(1u64).to_be_bytes::<32>());
        assert_eq!(cmd_word(5), &U256::from(2_500_000u64).to_be_bytes::<32>());
        let limit = U256::from(100_000u64) * U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(cmd_word(7), &limit.to_be_bytes::<32>());
    }

    #[test]
    fn monadswap_supports_only_token_pairs() {
        let monadswap = profile(RouterKind::MonadSwap);
        assert!(monadswap.supports(Leg::TokenToToken));
        assert!(!monadswap.supports(Leg::NativeToToken));
        assert!(!monadswap.supports(Leg::TokenToNative));

        let tx = monadswap
            .encode(&request(usdc(), weth(), 7), recipient(), U256::from(DEADLINE))
            .unwrap();
        let decoded = IMonadSwap::swapCall::abi_decode(&tx.data).unwrap();
        assert_eq!(decoded.fromToken, usdc().address());
        assert_eq!(decoded.toToken, weth().address());
        assert_eq!(decoded.amountIn, U256::from(7u64));

        let err = monadswap
            .encode(&request(mon(), usdc(), 7), recipient(), U256::from(DEADLINE))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Swap(SwapError::UnsupportedRoute { router: "monadswap", .. })
        ));
    }

    #[test]
    fn deadline_adds_configured_window() {
        let bean = profile(RouterKind::Bean);
        assert_eq!(bean.deadline(1_700_000_000), U256::from(DEADLINE));
    }

    #[test]
    fn bean_without_wrapped_native_is_rejected() {
        let config = RouterConfig {
            wrapped_native: None,
            ..RouterConfig::default()
        };
        assert!(RouterProfile::from_config(&config).is_err());
    }

    #[test]
    fn ambient_pool_index_must_fit_uint24() {
        let mut config = RouterConfig {
            kind: RouterKind::Ambient,
            ..RouterConfig::default()
        };
        config.ambient.pool_idx = 1 << 24;
        assert!(RouterProfile::from_config(&config).is_err());
    }

    #[test]
    fn ambient_quantity_beyond_uint128_is_out_of_range() {
        let ambient = profile(RouterKind::Ambient);
        let huge = SwapRequest::new(usdc(), weth(), U256::from(u128::MAX) + U256::from(1u64))
            .unwrap();

        let err = ambient
            .encode(&huge, recipient(), U256::from(DEADLINE))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::AmountOutOfRange { decimals: 6, .. })
        ));
    }
}
