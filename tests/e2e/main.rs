// End-to-end tests for the Voicebox Backend.
//
// Each test spawns its own in-process server on an ephemeral port, so tests
// run in parallel without conflicts. The playback tests drive the real
// controller and lookup source against that server.

mod helpers;
mod test_audio_lookup;
mod test_health;
mod test_playback;
