mod allocator_tests;
mod pipeline_tests;
