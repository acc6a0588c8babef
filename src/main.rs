fn main() {
    shmup_stage::game::run();
}
