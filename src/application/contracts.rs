//! ABI bindings for the contracts the swap core calls.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};

use crate::error::Result;

// ERC-20 interface (minimal for balances and approval)
sol! {
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

// Uniswap-V2 style router (Bean DEX, Ambient native legs)
sol! {
    interface IUniswapV2Router {
        function swapExactETHForTokens(uint256 amountOutMin, address[] path, address to, uint256 deadline) external payable returns (uint256[] amounts);
        function swapExactTokensForETH(uint256 amountIn, uint256 amountOutMin, address[] path, address to, uint256 deadline) external returns (uint256[] amounts);
        function swapExactTokensForTokens(uint256 amountIn, uint256 amountOutMin, address[] path, address to, uint256 deadline) external returns (uint256[] amounts);
    }
}

// Ambient (CrocSwap) command entry point
sol! {
    interface ICrocSwapDex {
        function userCmd(uint16 callpath, bytes cmd) external payable returns (bytes);
    }
}

// Fixed-rate MonadSwap contract
sol! {
    interface IMonadSwap {
        function swap(address fromToken, address toToken, uint256 amountIn) external returns (uint256 amountOut);
    }
}

/// Calldata for `balanceOf(account)`.
#[must_use]
pub fn balance_of(account: Address) -> Bytes {
    IERC20::balanceOfCall { account }.abi_encode().into()
}

/// Calldata for `allowance(owner, spender)`.
#[must_use]
pub fn allowance(owner: Address, spender: Address) -> Bytes {
    IERC20::allowanceCall { owner, spender }.abi_encode().into()
}

/// Calldata for `approve(spender, amount)`.
#[must_use]
pub fn approve(spender: Address, amount: U256) -> Bytes {
    IERC20::approveCall { spender, amount }.abi_encode().into()
}

/// Decode the single `uint256` returned by `balanceOf` or `allowance`.
pub fn decode_uint(data: &[u8]) -> Result<U256> {
    Ok(IERC20::balanceOfCall::abi_decode_returns(data)?)
}
