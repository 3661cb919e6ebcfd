fn main() {
    flappy_canyon::run();
}
