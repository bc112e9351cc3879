fn main() {
    multiversx_sc_meta_lib::cli_main::<strategy_factory::AbiProvider>();
}
