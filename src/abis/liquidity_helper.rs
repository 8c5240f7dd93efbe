use alloy::sol;

sol! {
    struct BinUserReserves {
        uint24 id;
        uint128 reserveX;
        uint128 reserveY;
        uint256 shares;
        uint256 totalShares;
    }

    #[sol(rpc)]
    interface ILiquidityHelper {
        function getBinsReserveOf(address pair, address user, uint24 id, uint24 binsAbove, uint24 binsBelow) external view returns (uint24 activeId, BinUserReserves[] memory reserves);
    }
}
