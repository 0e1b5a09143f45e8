mod openai_stream;
