mod graphql_parser_error_tests;
mod graphql_parser_tests;
mod graphql_result_tests;
mod property_tests;
mod sdl_tests;
mod utils;
