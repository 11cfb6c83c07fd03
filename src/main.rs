fn main() {
    riposte::uci::run_uci_loop();
}
